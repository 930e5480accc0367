use serde::Serialize;
use fellow_core::entities::Edge;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PairArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UnfollowResponse {
    removed: bool,
    edge: Option<Edge>,
}

/// Handle `fellow follow`.
pub async fn handle_follow(
    args: &PairArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let outcome = ctx.service.follow(&args.viewer, &args.target).await?;
    output(&outcome, flags.format)
}

/// Handle `fellow unfollow`.
pub async fn handle_unfollow(
    args: &PairArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let edge = ctx.service.unfollow(&args.viewer, &args.target).await?;
    output(
        &UnfollowResponse {
            removed: edge.is_some(),
            edge,
        },
        flags.format,
    )
}
