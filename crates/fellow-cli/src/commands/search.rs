use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::limit::{effective_limit, take_limited};
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut view = ctx.service.search(&args.viewer, &args.query).await?;
    if !view.has_results() {
        tracing::debug!(query = %view.query, "search returned no users");
    }
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    view.users = take_limited(view.users, limit);
    output(&view, flags.format)
}
