use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `fellow` binary.
#[derive(Debug, Parser)]
#[command(name = "fellow", version, about = "Fellow - follow relationships between users")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (overrides `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{ItemCommands, UserCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "fellow",
            "--format",
            "raw",
            "--limit",
            "10",
            "--verbose",
            "followers",
            "bob",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Followers(ref args) if args.user == "bob"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["fellow", "pending", "bob", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Pending(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["fellow", "--format", "table", "pending", "bob"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn follow_requires_acting_user() {
        assert!(Cli::try_parse_from(["fellow", "follow", "bob"]).is_err());

        let cli = Cli::try_parse_from(["fellow", "follow", "bob", "--as", "alice"])
            .expect("cli should parse");
        match cli.command {
            Commands::Follow(args) => {
                assert_eq!(args.target, "bob");
                assert_eq!(args.viewer, "alice");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn accept_and_reject_take_edge_id() {
        let cli = Cli::try_parse_from(["fellow", "accept", "flw-a3f8b2c1", "--as", "bob"])
            .expect("cli should parse");
        assert!(
            matches!(cli.command, Commands::Accept(ref args) if args.edge_id == "flw-a3f8b2c1" && args.viewer == "bob")
        );

        let cli = Cli::try_parse_from(["fellow", "reject", "flw-a3f8b2c1", "--as", "bob"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Reject(_)));
    }

    #[test]
    fn profile_subject_is_optional() {
        let cli = Cli::try_parse_from(["fellow", "profile", "--as", "alice"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Profile(ref args) if args.subject.is_none()));

        let cli = Cli::try_parse_from(["fellow", "profile", "bob", "--as", "alice"])
            .expect("cli should parse");
        assert!(
            matches!(cli.command, Commands::Profile(ref args) if args.subject.as_deref() == Some("bob"))
        );
    }

    #[test]
    fn user_and_item_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "fellow",
            "user",
            "add",
            "ada",
            "--username",
            "ada",
            "--first-name",
            "Ada",
            "--email",
            "ada@example.com",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::User {
                action: UserCommands::Add {
                    id,
                    username,
                    first_name,
                    last_name,
                    email,
                },
            } => {
                assert_eq!(id, "ada");
                assert_eq!(username, "ada");
                assert_eq!(first_name.as_deref(), Some("Ada"));
                assert_eq!(last_name, None);
                assert_eq!(email.as_deref(), Some("ada@example.com"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["fellow", "item", "assign", "ada", "itm-0c1d2e3f"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Item {
                action: ItemCommands::Assign { .. }
            }
        ));
    }

    #[test]
    fn history_parses_filters() {
        let cli = Cli::try_parse_from([
            "fellow",
            "history",
            "--actor",
            "bob",
            "--action",
            "accepted",
        ])
        .expect("cli should parse");
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.edge_id, None);
                assert_eq!(args.actor.as_deref(), Some("bob"));
                assert_eq!(args.action.as_deref(), Some("accepted"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["fellow", "--db", "/tmp/demo.db", "pending", "bob"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
