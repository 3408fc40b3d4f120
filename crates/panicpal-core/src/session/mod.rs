//! The chat session: startup, submit, teardown.

pub mod handle;
pub mod orchestrator;

use panicpal_types::conversation::Turn;
use panicpal_types::error::ConversationError;
use thiserror::Error;

/// What the UI renders: the ready flag and the turns after the system turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub ready: bool,
    pub turns: Vec<Turn>,
}

/// Result of a `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input. Nothing changed.
    Rejected,
    /// Another submit is still pending on this session.
    Busy,
    /// The session was torn down while the reply was pending. The user turn
    /// stays in memory and nothing was saved.
    Cancelled,
    /// The exchange finished and was saved.
    Completed { reply: Turn, fallback: bool },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not initialized")]
    NotReady,

    #[error(transparent)]
    Conversation(#[from] ConversationError),
}
