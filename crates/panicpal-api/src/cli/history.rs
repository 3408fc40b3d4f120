//! `panicpal history`: print the saved conversation.

use anyhow::Result;
use console::style;

use panicpal_core::persistence::gateway::PersistenceGateway;
use panicpal_types::conversation::Role;

use crate::state::AppState;

pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let gateway = PersistenceGateway::new(state.open_store().await?);
    let conversation = gateway.load().await;
    let turns = conversation
        .as_ref()
        .map(|c| c.history().to_vec())
        .unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    if turns.is_empty() {
        println!();
        println!("  {}", style("No saved conversation.").dim());
        println!();
        return Ok(());
    }

    println!();
    for turn in &turns {
        let label = match turn.role {
            Role::User => style("You").green().bold(),
            Role::Assistant | Role::Loading => style("PanicPal").cyan().bold(),
            Role::System => continue,
        };
        println!("  {label} {}", turn.content);
    }
    println!();
    println!(
        "  {}",
        style(format!("{} messages", turns.len())).dim()
    );
    println!();

    Ok(())
}
