//! Persistence gateway for the conversation.
//!
//! Reads and writes the conversation as a JSON array of `{role, content}`
//! under a single fixed key. Persistence is best-effort: read problems
//! become "no saved conversation" and write problems are logged.

use panicpal_types::conversation::Conversation;
use tracing::{debug, info, warn};

use crate::storage::kv_store::KvStore;

/// Key the conversation is stored under.
pub const HISTORY_KEY: &str = "chatHistory";

/// Loads and saves the single conversation of this installation.
pub struct PersistenceGateway<K: KvStore> {
    store: K,
}

impl<K: KvStore> PersistenceGateway<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Load the saved conversation.
    ///
    /// Returns `None` when the key is missing, the read fails, the JSON does
    /// not decode, or the decoded turns break the conversation invariants.
    pub async fn load(&self) -> Option<Conversation> {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = HISTORY_KEY, "No saved conversation");
                return None;
            }
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "Failed to read saved conversation");
                return None;
            }
        };

        match serde_json::from_str::<Conversation>(&raw) {
            Ok(conversation) => {
                info!(turns = conversation.len(), "Loaded saved conversation");
                Some(conversation)
            }
            Err(e) => {
                warn!(key = HISTORY_KEY, error = %e, "Ignoring malformed saved conversation");
                None
            }
        }
    }

    /// Save the conversation. Failures are logged and swallowed.
    pub async fn save(&self, conversation: &Conversation) {
        let encoded = match serde_json::to_string(conversation) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Failed to encode conversation");
                return;
            }
        };

        match self.store.set(HISTORY_KEY, &encoded).await {
            Ok(()) => debug!(turns = conversation.len(), "Saved conversation"),
            Err(e) => warn!(key = HISTORY_KEY, error = %e, "Failed to save conversation"),
        }
    }

    /// Delete the saved conversation. Failures are logged and swallowed.
    pub async fn clear(&self) {
        match self.store.delete(HISTORY_KEY).await {
            Ok(()) => info!("Cleared saved conversation"),
            Err(e) => warn!(key = HISTORY_KEY, error = %e, "Failed to clear saved conversation"),
        }
    }
}
