//! CLI command definitions for the `panicpal` binary.
//!
//! Uses clap derive macros for argument parsing. Running `panicpal` with no
//! subcommand starts a chat.

pub mod chat;
pub mod config;
pub mod history;
pub mod reset;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A calm voice to talk to during a panic attack.
#[derive(Parser)]
#[command(name = "panicpal", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start chatting (the default).
    Chat {
        /// Keep this conversation in memory only; nothing is saved.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print the saved conversation.
    History,

    /// Delete the saved conversation.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        force: bool,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["panicpal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_chat_ephemeral_flag() {
        let cli = Cli::try_parse_from(["panicpal", "chat", "--ephemeral"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Chat { ephemeral: true })));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["panicpal", "history", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::History)));
    }

    #[test]
    fn test_reset_force() {
        let cli = Cli::try_parse_from(["panicpal", "reset", "-f"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Reset { force: true })));
    }
}
