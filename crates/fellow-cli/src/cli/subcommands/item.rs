use clap::Subcommand;

/// Catalog item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// Create a catalog item.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Associate an item with a user.
    Assign { user: String, item: String },
    /// Items associated with a user.
    List { user: String },
}
