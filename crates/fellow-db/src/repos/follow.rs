//! Follow state machine execution.
//!
//! Each operation reads the current state, asks `fellow_core::transitions`
//! for a plan, and applies it with one conditional write. A write that finds
//! its guard violated means another request got there first: the state is
//! read again and re-planned, at most `RetryConfig::max_attempts` times.

use fellow_core::audit_detail::{PairDetail, StatusChangedDetail};
use fellow_core::entities::Edge;
use fellow_core::enums::{Decision, EdgeAction, FollowChange, FollowStatus};
use fellow_core::errors::CoreError;
use fellow_core::transitions::{
    FollowPlan, UnfollowPlan, plan_follow, plan_resolution, plan_unfollow, validate_ids,
    validate_pair,
};
use fellow_core::views::FollowOutcome;

use crate::error::DatabaseError;
use crate::service::FellowService;

fn conflicts_exhausted(operation: &str, subject: &str, attempts: u32) -> DatabaseError {
    tracing::warn!(operation, subject, attempts, "conflict retry budget exhausted");
    DatabaseError::Unavailable {
        attempts,
        reason: format!("{operation} on {subject} kept losing concurrent updates"),
    }
}

impl FellowService {
    /// Request to follow `target_id`.
    ///
    /// Creates a pending edge, re-opens a rejected one in place, or reports
    /// the existing pending/accepted edge without touching it.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for blank ids or a self-follow, `NotFound` if the
    /// target is unknown to the identity directory, `Unavailable` if the pair
    /// kept changing underneath.
    pub async fn follow(
        &self,
        follower_id: &str,
        target_id: &str,
    ) -> Result<FollowOutcome, DatabaseError> {
        validate_pair(follower_id, target_id)?;
        if self.directory().resolve_by_id(target_id).await?.is_none() {
            return Err(CoreError::user_not_found(target_id).into());
        }

        let max_attempts = self.db().retry().max_attempts;
        for attempt in 1..=max_attempts {
            let state = self.edge_state(follower_id, target_id).await?;
            match plan_follow(follower_id, target_id, state)? {
                FollowPlan::Keep(edge, change) => {
                    tracing::debug!(edge_id = %edge.id, %change, "follow is a no-op");
                    return Ok(FollowOutcome { edge, change });
                }
                FollowPlan::Create => {
                    if let Some(edge) = self.insert_pending_edge(follower_id, target_id).await? {
                        tracing::info!(edge_id = %edge.id, follower_id, target_id, "follow requested");
                        self.record_audit(
                            &edge.id,
                            follower_id,
                            EdgeAction::Created,
                            &pair_detail(&edge),
                        )
                        .await;
                        return Ok(FollowOutcome {
                            edge,
                            change: FollowChange::Requested,
                        });
                    }
                }
                FollowPlan::Reopen(rejected) => {
                    if let Some(edge) = self
                        .compare_and_set_status(
                            &rejected.id,
                            FollowStatus::Rejected,
                            FollowStatus::Pending,
                            true,
                        )
                        .await?
                    {
                        tracing::info!(edge_id = %edge.id, follower_id, target_id, "follow re-requested");
                        self.record_audit(
                            &edge.id,
                            follower_id,
                            EdgeAction::Rerequested,
                            &status_detail(FollowStatus::Rejected, FollowStatus::Pending),
                        )
                        .await;
                        return Ok(FollowOutcome {
                            edge,
                            change: FollowChange::Rerequested,
                        });
                    }
                }
            }
            tracing::debug!(attempt, follower_id, target_id, "follow lost a race, re-reading pair");
        }

        Err(conflicts_exhausted(
            "follow",
            &format!("{follower_id} -> {target_id}"),
            max_attempts,
        ))
    }

    /// Accept a pending request. Only the edge's target may accept.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown edge, `Forbidden` if `actor_id` is not the
    /// target, `InvalidState` if the edge is not pending.
    pub async fn accept_request(&self, edge_id: &str, actor_id: &str) -> Result<Edge, DatabaseError> {
        self.resolve_request(edge_id, actor_id, Decision::Accept).await
    }

    /// Reject a pending request. Only the edge's target may reject.
    ///
    /// # Errors
    ///
    /// Same as [`Self::accept_request`].
    pub async fn reject_request(&self, edge_id: &str, actor_id: &str) -> Result<Edge, DatabaseError> {
        self.resolve_request(edge_id, actor_id, Decision::Reject).await
    }

    async fn resolve_request(
        &self,
        edge_id: &str,
        actor_id: &str,
        decision: Decision,
    ) -> Result<Edge, DatabaseError> {
        let max_attempts = self.db().retry().max_attempts;
        for attempt in 1..=max_attempts {
            let edge = self
                .get_edge(edge_id)
                .await?
                .ok_or_else(|| CoreError::edge_not_found(edge_id))?;

            let resolution = match plan_resolution(&edge, actor_id, decision) {
                Ok(resolution) => resolution,
                Err(error) => {
                    if matches!(error, CoreError::Forbidden { .. }) {
                        tracing::warn!(
                            edge_id,
                            actor_id,
                            target_id = %edge.following_id,
                            action = decision.as_str(),
                            "actor does not own follow request"
                        );
                    }
                    return Err(error.into());
                }
            };

            if let Some(updated) = self
                .compare_and_set_status(edge_id, resolution.from, resolution.to, false)
                .await?
            {
                tracing::info!(
                    edge_id,
                    actor_id,
                    follower_id = %updated.follower_id,
                    status = %updated.status,
                    "follow request resolved"
                );
                self.record_audit(
                    edge_id,
                    actor_id,
                    EdgeAction::from(decision),
                    &status_detail(resolution.from, resolution.to),
                )
                .await;
                return Ok(updated);
            }
            tracing::debug!(attempt, edge_id, "status changed underneath, re-reading edge");
        }

        Err(conflicts_exhausted(decision.as_str(), edge_id, max_attempts))
    }

    /// Remove the edge from `follower_id` to `target_id`, whatever its status.
    ///
    /// Returns the removed edge, or `None` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for blank ids. A self-pair has no edge and is `None`.
    pub async fn unfollow(
        &self,
        follower_id: &str,
        target_id: &str,
    ) -> Result<Option<Edge>, DatabaseError> {
        validate_ids(follower_id, target_id)?;

        let max_attempts = self.db().retry().max_attempts;
        for attempt in 1..=max_attempts {
            let state = self.edge_state(follower_id, target_id).await?;
            match plan_unfollow(&state) {
                UnfollowPlan::Nothing => {
                    tracing::debug!(follower_id, target_id, "unfollow without edge");
                    return Ok(None);
                }
                UnfollowPlan::Remove { edge_id } => {
                    if let Some(edge) = self.delete_edge(&edge_id).await? {
                        tracing::info!(edge_id = %edge.id, follower_id, target_id, status = %edge.status, "edge removed");
                        self.record_audit(
                            &edge.id,
                            follower_id,
                            EdgeAction::Removed,
                            &pair_detail(&edge),
                        )
                        .await;
                        return Ok(Some(edge));
                    }
                }
            }
            tracing::debug!(attempt, follower_id, target_id, "unfollow lost a race, re-reading pair");
        }

        Err(conflicts_exhausted(
            "unfollow",
            &format!("{follower_id} -> {target_id}"),
            max_attempts,
        ))
    }
}

fn pair_detail(edge: &Edge) -> PairDetail {
    PairDetail {
        follower_id: edge.follower_id.clone(),
        following_id: edge.following_id.clone(),
        status: edge.status.as_str().to_string(),
    }
}

fn status_detail(from: FollowStatus, to: FollowStatus) -> StatusChangedDetail {
    StatusChangedDetail {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    }
}
