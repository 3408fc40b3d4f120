//! In-memory conversation store.
//!
//! Owns the live turn list: the persisted [`Conversation`] plus at most one
//! `Loading` turn while a reply is pending. The loading turn is held in its
//! own slot, so "at most one" holds by construction and it always renders
//! last.

use panicpal_types::conversation::{Conversation, Role, Turn};
use panicpal_types::error::ConversationError;

/// Ordered turn list with the conversation invariants enforced on every write.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    conversation: Conversation,
    loading: Option<Turn>,
}

impl ConversationStore {
    /// Create a store seeded with a validated conversation.
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation,
            loading: None,
        }
    }

    /// Overwrite the whole list with a freshly loaded conversation.
    pub fn replace(&mut self, conversation: Conversation) {
        self.conversation = conversation;
        self.loading = None;
    }

    /// Append a turn and return the new ordered list.
    ///
    /// System turns cannot be appended (index 0 is the only one), and a second
    /// loading turn is rejected while one is present.
    pub fn append(&mut self, turn: Turn) -> Result<Vec<Turn>, ConversationError> {
        match turn.role {
            Role::System => return Err(ConversationError::SystemTurnAppended),
            Role::Loading => {
                if self.loading.is_some() {
                    return Err(ConversationError::DuplicateLoading);
                }
                self.loading = Some(turn);
            }
            Role::User | Role::Assistant => self.conversation.push(turn)?,
        }

        Ok(self.turns())
    }

    /// Rewrite the loading turn's content. No-op when there is none.
    pub fn update_loading_content(&mut self, content: &str) {
        if let Some(turn) = self.loading.as_mut() {
            turn.content.clear();
            turn.content.push_str(content);
        }
    }

    /// Remove the loading turn. No-op when there is none.
    pub fn remove_loading(&mut self) {
        self.loading = None;
    }

    pub fn has_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// The current loading turn, if a reply is pending.
    pub fn loading(&self) -> Option<&Turn> {
        self.loading.as_ref()
    }

    /// The full live list, system turn first.
    pub fn turns(&self) -> Vec<Turn> {
        self.conversation
            .turns()
            .iter()
            .chain(self.loading.iter())
            .cloned()
            .collect()
    }

    /// Turns the UI renders: everything after the system turn, loading included.
    pub fn visible_turns(&self) -> Vec<Turn> {
        self.conversation
            .history()
            .iter()
            .chain(self.loading.iter())
            .cloned()
            .collect()
    }

    /// The list as it should be written to durable storage.
    pub fn snapshot_for_persistence(&self) -> Conversation {
        self.conversation.clone()
    }

    /// The list as it should be sent to the assistant endpoint.
    pub fn snapshot_for_dispatch(&self) -> Vec<Turn> {
        self.conversation.turns().to_vec()
    }
}
