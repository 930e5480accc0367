use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::commands::shared::limit::{effective_limit, take_limited};
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow item`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ItemCommands::Add { title, author } => {
            let item = ctx.catalog.add_item(title, author.as_deref()).await?;
            output(&item, flags.format)
        }
        ItemCommands::Assign { user, item } => {
            let assigned = ctx.catalog.assign(user, item).await?;
            output(
                &json!({ "user_id": user, "item_id": item, "assigned": assigned }),
                flags.format,
            )
        }
        ItemCommands::List { user } => {
            let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
            let items = take_limited(ctx.catalog.items_for(user).await?, limit);
            output(&items, flags.format)
        }
    }
}
