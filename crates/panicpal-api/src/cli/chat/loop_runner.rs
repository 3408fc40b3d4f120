//! Main chat loop orchestration.
//!
//! Restores the saved conversation, prints the banner, then multiplexes
//! three event sources on one task: typed lines, session view changes and
//! finished submits. Submits run as spawned tasks so the prompt keeps
//! animating while a reply is pending.

use std::io::Write;

use console::style;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use panicpal_core::session::handle::SessionHandle;
use panicpal_core::session::orchestrator::SessionOrchestrator;
use panicpal_core::session::{SessionError, SubmitOutcome};
use panicpal_core::storage::kv_store::KvStore;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{ChatRenderer, TranscriptCursor, idle_prompt, prompt_for};

/// Run the interactive chat loop over the given store.
///
/// `persistent` only changes what the banner says; whether anything is
/// kept is decided by the store passed in.
pub async fn run_chat_loop<K: KvStore + 'static>(
    state: &AppState,
    kv: K,
    persistent: bool,
) -> anyhow::Result<()> {
    let client = state.assistant_client()?;
    debug!(client = client.name(), "Assistant client ready");

    let session = SessionHandle::new(SessionOrchestrator::from_config(&state.config, kv, client));
    session.initialize().await;

    let renderer = ChatRenderer::new();
    let mut views = session.subscribe();
    let mut cursor = TranscriptCursor::default();

    let restored = {
        let view = views.borrow_and_update().clone();
        let turns = cursor.advance(&view);
        print_welcome_banner(persistent, turns.len());
        for turn in &turns {
            if let Some(text) = renderer.render_turn(turn) {
                print!("{text}");
            }
        }
        turns.len()
    };
    if restored > 0 {
        println!();
    }

    let (mut chat_input, mut writer) = ChatInput::new(idle_prompt())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let mut pending: JoinSet<Result<SubmitOutcome, SessionError>> = JoinSet::new();

    loop {
        tokio::select! {
            event = chat_input.read_line() => match event {
                InputEvent::Eof => break,
                InputEvent::Interrupted => {
                    writeln!(
                        writer,
                        "\n  {}",
                        style("Press Ctrl+D to exit, or keep talking.").dim()
                    )?;
                }
                InputEvent::Message(text) => {
                    if let Some(cmd) = commands::parse(&text) {
                        match cmd {
                            ChatCommand::Help => commands::write_help(&mut writer)?,
                            ChatCommand::Clear => chat_input.clear(),
                            ChatCommand::Exit => break,
                            ChatCommand::History => {
                                let view = session.view();
                                writeln!(writer)?;
                                for turn in &view.turns {
                                    if let Some(rendered) = renderer.render_turn(turn) {
                                        write!(writer, "{rendered}")?;
                                    }
                                }
                                writeln!(writer)?;
                            }
                            ChatCommand::Reset => {
                                if session.clear_history().await {
                                    writeln!(
                                        writer,
                                        "\n  {} Started a new conversation.\n",
                                        style("*").cyan().bold()
                                    )?;
                                } else {
                                    writeln!(
                                        writer,
                                        "\n  {} Wait for the current reply before starting over.\n",
                                        style("!").yellow().bold()
                                    )?;
                                }
                            }
                            ChatCommand::Unknown(name) => {
                                writeln!(
                                    writer,
                                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                    style("?").yellow().bold(),
                                    style(name).dim()
                                )?;
                            }
                        }
                        continue;
                    }

                    let session = session.clone();
                    pending.spawn(async move { session.submit(&text).await });
                }
            },

            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                for turn in cursor.advance(&view) {
                    // The input line already shows what the user typed
                    if turn.role.renders_as_assistant() {
                        if let Some(rendered) = renderer.render_turn(&turn) {
                            write!(writer, "{rendered}")?;
                        }
                    }
                }
                chat_input.set_prompt(&prompt_for(&view));
            }

            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                match joined {
                    Ok(Ok(SubmitOutcome::Busy)) => {
                        writeln!(
                            writer,
                            "  {}",
                            style("Still waiting on the last reply. Send that again in a moment.").dim()
                        )?;
                    }
                    Ok(Ok(SubmitOutcome::Completed { fallback: true, .. })) => {
                        writeln!(
                            writer,
                            "  {}\n",
                            style("(offline: check your connection or the endpoint in `panicpal config`)").dim()
                        )?;
                    }
                    Ok(Ok(
                        SubmitOutcome::Completed { .. }
                        | SubmitOutcome::Rejected
                        | SubmitOutcome::Cancelled,
                    )) => {}
                    Ok(Err(e)) => {
                        warn!(error = %e, "Submit failed");
                        writeln!(writer, "\n  {} {e}\n", style("!").red().bold())?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    // Teardown cancels a reply still in flight
    session.teardown().await;
    while let Some(joined) = pending.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Submit task failed");
        }
    }

    writeln!(writer, "\n  {}", style("Take care. Session ended.").dim())?;
    chat_input.flush();

    Ok(())
}
