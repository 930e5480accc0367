//! Relationship store: keyed access to follow edges.
//!
//! Writes are single conditional statements so that each one is atomic with
//! respect to the read that planned it:
//! - creation is `INSERT ... ON CONFLICT DO NOTHING RETURNING`
//! - status changes are compare-and-set on `(id, status)`
//! - removal is `DELETE ... RETURNING`
//!
//! Each returns `None` when the guarded row was not there, which callers treat
//! as a lost race.

use chrono::Utc;

use fellow_core::entities::Edge;
use fellow_core::enums::FollowStatus;
use fellow_core::ids::PREFIX_FOLLOW;
use fellow_core::transitions::EdgeState;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, timestamp};
use crate::service::FellowService;

const EDGE_COLS: &str =
    "id, follower_id, following_id, status, created_at, requested_at, updated_at";

fn row_to_edge(row: &libsql::Row) -> Result<Edge, DatabaseError> {
    Ok(Edge {
        id: row.get::<String>(0)?,
        follower_id: row.get::<String>(1)?,
        following_id: row.get::<String>(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        requested_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl FellowService {
    /// Look up an edge by id. Absence is `Ok(None)`.
    pub async fn get_edge(&self, edge_id: &str) -> Result<Option<Edge>, DatabaseError> {
        self.db()
            .query_row(
                &format!("SELECT {EDGE_COLS} FROM user_follows WHERE id = ?1"),
                || [edge_id],
                row_to_edge,
            )
            .await
    }

    /// Exact-pair lookup on the unique `(follower_id, following_id)` index.
    pub async fn find_edge_by_pair(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<Option<Edge>, DatabaseError> {
        self.db()
            .query_row(
                &format!(
                    "SELECT {EDGE_COLS} FROM user_follows
                     WHERE follower_id = ?1 AND following_id = ?2"
                ),
                || [follower_id, following_id],
                row_to_edge,
            )
            .await
    }

    /// Current state of the ordered pair, for the state machine.
    pub async fn edge_state(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<EdgeState, DatabaseError> {
        Ok(EdgeState::from_lookup(
            self.find_edge_by_pair(follower_id, following_id).await?,
        ))
    }

    /// Insert a pending edge. `None` means a row for the pair (or the
    /// generated id) already exists.
    pub(crate) async fn insert_pending_edge(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<Option<Edge>, DatabaseError> {
        let id = self.db().generate_id(PREFIX_FOLLOW).await?;
        let now = timestamp(Utc::now());
        self.db()
            .query_row(
                &format!(
                    "INSERT INTO user_follows (id, follower_id, following_id, status, created_at, requested_at, updated_at)
                     VALUES (?1, ?2, ?3, 'pending', ?4, ?4, ?4)
                     ON CONFLICT DO NOTHING
                     RETURNING {EDGE_COLS}"
                ),
                || libsql::params![id.as_str(), follower_id, following_id, now.as_str()],
                row_to_edge,
            )
            .await
    }

    /// Move an edge from `from` to `to` if it is still in `from`.
    ///
    /// With `rerequest`, `requested_at` moves forward as well.
    pub(crate) async fn compare_and_set_status(
        &self,
        edge_id: &str,
        from: FollowStatus,
        to: FollowStatus,
        rerequest: bool,
    ) -> Result<Option<Edge>, DatabaseError> {
        let now = timestamp(Utc::now());
        let requested = if rerequest { ", requested_at = ?2" } else { "" };
        self.db()
            .query_row(
                &format!(
                    "UPDATE user_follows SET status = ?1, updated_at = ?2{requested}
                     WHERE id = ?3 AND status = ?4
                     RETURNING {EDGE_COLS}"
                ),
                || libsql::params![to.as_str(), now.as_str(), edge_id, from.as_str()],
                row_to_edge,
            )
            .await
    }

    /// Delete an edge, returning it if it was still present.
    pub(crate) async fn delete_edge(&self, edge_id: &str) -> Result<Option<Edge>, DatabaseError> {
        self.db()
            .query_row(
                &format!("DELETE FROM user_follows WHERE id = ?1 RETURNING {EDGE_COLS}"),
                || [edge_id],
                row_to_edge,
            )
            .await
    }

    /// Edges pointing at `user_id`, optionally filtered by status, most
    /// recently changed first.
    pub async fn edges_to(
        &self,
        user_id: &str,
        status: Option<FollowStatus>,
    ) -> Result<Vec<Edge>, DatabaseError> {
        self.edges_by_endpoint("following_id", user_id, status).await
    }

    /// Edges leaving `user_id`, optionally filtered by status, most recently
    /// changed first.
    pub async fn edges_from(
        &self,
        user_id: &str,
        status: Option<FollowStatus>,
    ) -> Result<Vec<Edge>, DatabaseError> {
        self.edges_by_endpoint("follower_id", user_id, status).await
    }

    async fn edges_by_endpoint(
        &self,
        column: &'static str,
        user_id: &str,
        status: Option<FollowStatus>,
    ) -> Result<Vec<Edge>, DatabaseError> {
        match status {
            Some(status) => {
                self.db()
                    .query_map(
                        &format!(
                            "SELECT {EDGE_COLS} FROM user_follows
                             WHERE {column} = ?1 AND status = ?2
                             ORDER BY updated_at DESC, id"
                        ),
                        || [user_id, status.as_str()],
                        row_to_edge,
                    )
                    .await
            }
            None => {
                self.db()
                    .query_map(
                        &format!(
                            "SELECT {EDGE_COLS} FROM user_follows
                             WHERE {column} = ?1
                             ORDER BY updated_at DESC, id"
                        ),
                        || [user_id],
                        row_to_edge,
                    )
                    .await
            }
        }
    }

    /// Pending requests addressed to `user_id`, newest request first.
    ///
    /// A re-request after rejection counts as new, so ordering uses
    /// `requested_at` rather than `created_at`.
    pub async fn list_pending_requests(&self, user_id: &str) -> Result<Vec<Edge>, DatabaseError> {
        self.db()
            .query_map(
                &format!(
                    "SELECT {EDGE_COLS} FROM user_follows
                     WHERE following_id = ?1 AND status = 'pending'
                     ORDER BY requested_at DESC, created_at DESC, id"
                ),
                || [user_id],
                row_to_edge,
            )
            .await
    }
}
