//! `panicpal reset`: delete the saved conversation.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use panicpal_core::persistence::gateway::PersistenceGateway;

use crate::state::AppState;

pub async fn reset_history(state: &AppState, force: bool, json: bool) -> Result<()> {
    let gateway = PersistenceGateway::new(state.open_store().await?);

    if gateway.load().await.is_none() {
        if json {
            println!("{}", serde_json::json!({ "cleared": false }));
        } else {
            println!("  {}", style("Nothing to reset.").dim());
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Delete the saved conversation? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    gateway.clear().await;

    if json {
        println!("{}", serde_json::json!({ "cleared": true }));
    } else {
        println!(
            "  {} Conversation deleted. Your next chat starts fresh.",
            style("✓").green().bold()
        );
    }

    Ok(())
}
