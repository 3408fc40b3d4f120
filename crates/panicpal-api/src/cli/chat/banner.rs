//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(persistent: bool, restored: usize) {
    println!();
    println!("  {}", style("PanicPal").cyan().bold());
    println!(
        "  {}",
        style("You are not alone. Take a slow breath and tell me what is happening.").dim()
    );
    println!();

    let storage = if persistent {
        "saved on this device"
    } else {
        "not saved (ephemeral)"
    };
    println!("  {}  {}", style("Conversation:").bold(), style(storage).dim());
    if restored > 0 {
        println!(
            "  {}  {}",
            style("Restored:").bold(),
            style(format!("{restored} earlier messages")).dim()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
