//! PanicPal terminal entry point.
//!
//! Binary name: `panicpal`
//!
//! Parses CLI arguments, sets up tracing and application state, then
//! dispatches to the chosen command. No subcommand starts a chat.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use panicpal_core::storage::memory::InMemoryKvStore;
use panicpal_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Chat { ephemeral: false });

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "panicpal", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match command {
        Commands::Chat { ephemeral: true } => {
            cli::chat::loop_runner::run_chat_loop(&state, InMemoryKvStore::new(), false).await?;
        }
        Commands::Chat { ephemeral: false } => {
            let store = state.open_store().await?;
            cli::chat::loop_runner::run_chat_loop(&state, store, true).await?;
        }
        Commands::History => cli::history::show_history(&state, cli.json).await?,
        Commands::Reset { force } => cli::reset::reset_history(&state, force, cli.json).await?,
        Commands::Config => cli::config::show_config(&state, cli.json)?,
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
