//! Follow relationship state machine.
//!
//! Pure transition logic: every function takes the current [`EdgeState`] of a
//! pair (as read from the store) plus the request, and returns a plan the
//! store layer executes. Nothing here performs I/O.
//!
//! ```text
//!            follow               accept
//! NoEdge ──────────────▶ Pending ────────▶ Accepted
//!   ▲                      │  ▲
//!   │ unfollow (any)       │  │ follow (re-request)
//!   │               reject ▼  │
//!   └──────────────────── Rejected
//! ```

use crate::entities::Edge;
use crate::enums::{Decision, FollowChange, FollowStatus};
use crate::errors::CoreError;

/// State of an ordered pair, with absence as an explicit variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeState {
    NoEdge,
    Pending(Edge),
    Accepted(Edge),
    Rejected(Edge),
}

impl EdgeState {
    /// Lift a store lookup result into the state machine.
    #[must_use]
    pub fn from_lookup(edge: Option<Edge>) -> Self {
        match edge {
            None => Self::NoEdge,
            Some(edge) => match edge.status {
                FollowStatus::Pending => Self::Pending(edge),
                FollowStatus::Accepted => Self::Accepted(edge),
                FollowStatus::Rejected => Self::Rejected(edge),
            },
        }
    }

    /// Persisted status, or `None` for [`EdgeState::NoEdge`].
    #[must_use]
    pub const fn status(&self) -> Option<FollowStatus> {
        match self {
            Self::NoEdge => None,
            Self::Pending(_) => Some(FollowStatus::Pending),
            Self::Accepted(_) => Some(FollowStatus::Accepted),
            Self::Rejected(_) => Some(FollowStatus::Rejected),
        }
    }

    #[must_use]
    pub const fn edge(&self) -> Option<&Edge> {
        match self {
            Self::NoEdge => None,
            Self::Pending(edge) | Self::Accepted(edge) | Self::Rejected(edge) => Some(edge),
        }
    }

    /// `isFollowing` for the pair: only an accepted edge counts.
    #[must_use]
    pub const fn is_following(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// What the store must do to satisfy a `follow` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowPlan {
    /// Insert a new pending edge for the pair.
    Create,
    /// Move the rejected edge back to pending in place.
    Reopen(Edge),
    /// Leave the existing edge untouched.
    Keep(Edge, FollowChange),
}

/// A status change on an existing edge, applied with compare-and-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub from: FollowStatus,
    pub to: FollowStatus,
}

/// What the store must do to satisfy an `unfollow` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnfollowPlan {
    Remove { edge_id: String },
    Nothing,
}

/// Reject blank ids.
///
/// # Errors
///
/// Returns `CoreError::InvalidRequest` if either id is blank.
pub fn validate_ids(follower_id: &str, target_id: &str) -> Result<(), CoreError> {
    if follower_id.trim().is_empty() || target_id.trim().is_empty() {
        return Err(CoreError::InvalidRequest(
            "follower and target ids must not be blank".into(),
        ));
    }
    Ok(())
}

/// Reject blank ids and self-follows.
///
/// # Errors
///
/// Returns `CoreError::InvalidRequest` if either id is blank or both are equal.
pub fn validate_pair(follower_id: &str, target_id: &str) -> Result<(), CoreError> {
    validate_ids(follower_id, target_id)?;
    if follower_id == target_id {
        return Err(CoreError::InvalidRequest(format!(
            "{follower_id} cannot follow themselves"
        )));
    }
    Ok(())
}

/// Plan a `follow(follower, target)` request against the pair's current state.
///
/// # Errors
///
/// Returns `CoreError::InvalidRequest` for blank ids or a self-follow.
pub fn plan_follow(
    follower_id: &str,
    target_id: &str,
    state: EdgeState,
) -> Result<FollowPlan, CoreError> {
    validate_pair(follower_id, target_id)?;
    Ok(match state {
        EdgeState::NoEdge => FollowPlan::Create,
        EdgeState::Pending(edge) => FollowPlan::Keep(edge, FollowChange::AlreadyPending),
        EdgeState::Accepted(edge) => FollowPlan::Keep(edge, FollowChange::AlreadyFollowing),
        EdgeState::Rejected(edge) => FollowPlan::Reopen(edge),
    })
}

/// Plan an accept or reject of `edge` by `actor_id`.
///
/// Ownership is checked before status so that a non-target never learns
/// anything about the edge's progress.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if `actor_id` is not the edge's target, and
/// `CoreError::InvalidState` if the edge is not pending.
pub fn plan_resolution(
    edge: &Edge,
    actor_id: &str,
    decision: Decision,
) -> Result<Resolution, CoreError> {
    if !edge.is_target(actor_id) {
        return Err(CoreError::Forbidden {
            actor: actor_id.to_string(),
            action: decision.as_str().to_string(),
            edge_id: edge.id.clone(),
        });
    }

    let to = decision.target_status();
    if edge.status != FollowStatus::Pending || !edge.status.can_transition_to(to) {
        return Err(CoreError::InvalidState {
            edge_id: edge.id.clone(),
            action: decision.as_str().to_string(),
            status: edge.status.as_str().to_string(),
        });
    }

    Ok(Resolution {
        from: edge.status,
        to,
    })
}

/// Plan an `unfollow`. Removal is total: every persisted status is removable.
#[must_use]
pub fn plan_unfollow(state: &EdgeState) -> UnfollowPlan {
    match state.edge() {
        Some(edge) => UnfollowPlan::Remove {
            edge_id: edge.id.clone(),
        },
        None => UnfollowPlan::Nothing,
    }
}
