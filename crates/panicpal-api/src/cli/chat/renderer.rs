//! Transcript rendering for the chat loop.
//!
//! Replies are rendered as terminal markdown with `termimad`. The loading
//! turn is never printed as a line: it is shown in the prompt, rewritten in
//! place as its glyph changes.

use console::style;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use panicpal_core::session::SessionView;
use panicpal_types::conversation::{Role, Turn};

/// Terminal renderer for conversation turns.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }

    /// Render one turn as printable text. System and loading turns render
    /// as nothing.
    pub fn render_turn(&self, turn: &Turn) -> Option<String> {
        match turn.role {
            Role::User => Some(format!(
                "  {} {}\n",
                style("You >").green().bold(),
                turn.content
            )),
            Role::Assistant => Some(format!(
                "\n  {}\n{}\n",
                style("PanicPal").cyan().bold(),
                self.render_markdown(&turn.content)
            )),
            Role::System | Role::Loading => None,
        }
    }

    pub fn render_markdown(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompt shown while idle.
pub fn idle_prompt() -> String {
    format!("  {} ", style("You >").green().bold())
}

/// Prompt for the given view: the loading glyph while a reply is pending.
pub fn prompt_for(view: &SessionView) -> String {
    match view.turns.last() {
        Some(turn) if turn.role == Role::Loading => format!(
            "  {} {} ",
            style("PanicPal").cyan().bold(),
            style(&turn.content).cyan()
        ),
        _ => idle_prompt(),
    }
}

/// Tracks which settled turns have already been printed.
#[derive(Debug, Default)]
pub struct TranscriptCursor {
    printed: usize,
}

impl TranscriptCursor {
    /// Return the settled turns not printed yet and mark them printed.
    ///
    /// The loading turn is never settled. When the conversation shrinks
    /// (it was reset), printing restarts from the beginning.
    pub fn advance(&mut self, view: &SessionView) -> Vec<Turn> {
        let settled: Vec<&Turn> = view
            .turns
            .iter()
            .filter(|t| t.role != Role::Loading)
            .collect();

        if settled.len() < self.printed {
            self.printed = 0;
        }

        let fresh = settled[self.printed..].iter().map(|t| (*t).clone()).collect();
        self.printed = settled.len();
        fresh
    }
}
