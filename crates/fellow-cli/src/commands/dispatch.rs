use fellow_core::enums::Decision;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Item { action } => commands::item::handle(&action, ctx, flags).await,
        Commands::Follow(args) => commands::follow::handle_follow(&args, ctx, flags).await,
        Commands::Unfollow(args) => commands::follow::handle_unfollow(&args, ctx, flags).await,
        Commands::Accept(args) => commands::decide::handle(&args, Decision::Accept, ctx, flags).await,
        Commands::Reject(args) => commands::decide::handle(&args, Decision::Reject, ctx, flags).await,
        Commands::Pending(args) => commands::social::handle_pending(&args, ctx, flags).await,
        Commands::Followers(args) => commands::social::handle_followers(&args, ctx, flags).await,
        Commands::Following(args) => commands::social::handle_following(&args, ctx, flags).await,
        Commands::Profile(args) => commands::profile::handle(&args, ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
    }
}
