use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProfileArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fellow profile`.
pub async fn handle(args: &ProfileArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile = ctx
        .service
        .get_profile(&args.viewer, args.subject.as_deref())
        .await?;
    output(&profile, flags.format)
}
