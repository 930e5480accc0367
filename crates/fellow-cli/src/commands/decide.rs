use fellow_core::enums::Decision;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DecisionArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow accept` and `fellow reject`.
pub async fn handle(
    args: &DecisionArgs,
    decision: Decision,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let edge = match decision {
        Decision::Accept => ctx.service.accept_request(&args.edge_id, &args.viewer).await?,
        Decision::Reject => ctx.service.reject_request(&args.edge_id, &args.viewer).await?,
    };
    output(&edge, flags.format)
}
