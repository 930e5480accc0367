use fellow_core::enums::EdgeAction;
use fellow_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::shared::limit::{effective_limit, take_limited};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow history`.
///
/// With only an edge ID the full trail is printed oldest first; any other
/// filter switches to the newest-first audit query.
pub async fn handle(args: &HistoryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    let action = args
        .action
        .as_deref()
        .map(|raw| parse_enum::<EdgeAction>(raw, "action"))
        .transpose()?;

    let entries = match (&args.edge_id, &args.actor, action) {
        (Some(edge_id), None, None) => take_limited(ctx.service.edge_history(edge_id).await?, limit),
        _ => {
            let filter = AuditFilter {
                edge_id: args.edge_id.clone(),
                actor_id: args.actor.clone(),
                action,
                limit: Some(limit),
            };
            ctx.service.query_audit(&filter).await?
        }
    };
    output(&entries, flags.format)
}
