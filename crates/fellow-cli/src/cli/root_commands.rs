use clap::{Args, Subcommand};

use crate::cli::subcommands::{ItemCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users in the local directory.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Catalog items.
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Request to follow a user.
    Follow(PairArgs),
    /// Remove a follow edge, whatever its status.
    Unfollow(PairArgs),
    /// Accept a pending follow request.
    Accept(DecisionArgs),
    /// Reject a pending follow request.
    Reject(DecisionArgs),
    /// Pending requests addressed to a user.
    Pending(UserArgs),
    /// Users with an accepted edge to a user.
    Followers(UserArgs),
    /// Users a user follows with an accepted edge.
    Following(UserArgs),
    /// A user's profile as seen by the acting user.
    Profile(ProfileArgs),
    /// Search users by name, username or email.
    Search(SearchArgs),
    /// Edge audit history.
    History(HistoryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PairArgs {
    /// User to follow or unfollow.
    pub target: String,
    /// Acting user.
    #[arg(long = "as", value_name = "USER")]
    pub viewer: String,
}

#[derive(Clone, Debug, Args)]
pub struct DecisionArgs {
    /// Edge ID of the pending request.
    pub edge_id: String,
    /// Acting user (the target of the request).
    #[arg(long = "as", value_name = "USER")]
    pub viewer: String,
}

#[derive(Clone, Debug, Args)]
pub struct UserArgs {
    pub user: String,
}

#[derive(Clone, Debug, Args)]
pub struct ProfileArgs {
    /// Profile owner; defaults to the acting user.
    pub subject: Option<String>,
    /// Acting user.
    #[arg(long = "as", value_name = "USER")]
    pub viewer: String,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    pub query: String,
    /// Acting user.
    #[arg(long = "as", value_name = "USER")]
    pub viewer: String,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Limit to one edge, oldest entry first.
    pub edge_id: Option<String>,
    #[arg(long)]
    pub actor: Option<String>,
    /// created, rerequested, accepted, rejected, removed
    #[arg(long)]
    pub action: Option<String>,
}
