use crate::cli::GlobalFlags;
use crate::cli::root_commands::UserArgs;
use crate::commands::shared::limit::{effective_limit, take_limited};
use crate::context::AppContext;
use crate::output::output;

fn list_limit(ctx: &AppContext, flags: &GlobalFlags) -> u32 {
    effective_limit(None, flags.limit, ctx.config.general.default_limit)
}

/// Handle `fellow pending`.
pub async fn handle_pending(
    args: &UserArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let requests = ctx.service.pending_inbox(&args.user).await?;
    output(&take_limited(requests, list_limit(ctx, flags)), flags.format)
}

/// Handle `fellow followers`.
pub async fn handle_followers(
    args: &UserArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let users = ctx.service.list_followers(&args.user).await?;
    output(&take_limited(users, list_limit(ctx, flags)), flags.format)
}

/// Handle `fellow following`.
pub async fn handle_following(
    args: &UserArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let users = ctx.service.list_following(&args.user).await?;
    output(&take_limited(users, list_limit(ctx, flags)), flags.format)
}
