//! Wire types for the remote assistant endpoint.
//!
//! Request: `{ "messages": [ {"role", "content"}, ... ] }`
//! Response: `{ "role": "assistant", "content": "..." }`

use serde::{Deserialize, Serialize};

use crate::conversation::{Role, Turn};
use crate::error::AssistantError;

/// Body POSTed to the assistant endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub messages: Vec<Turn>,
}

impl AssistantRequest {
    /// Build a request from a dispatch snapshot.
    ///
    /// Loading turns are dropped here as well so a request can never carry one.
    pub fn new(turns: &[Turn]) -> Self {
        Self {
            messages: turns
                .iter()
                .filter(|t| t.role != Role::Loading)
                .cloned()
                .collect(),
        }
    }
}

/// Body returned by the assistant endpoint.
///
/// The role is kept as a raw string so an unexpected value is a protocol
/// error rather than a decode failure with a less useful message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub role: String,
    pub content: String,
}

impl AssistantReply {
    /// Convert the reply into an assistant turn, checking the role.
    pub fn into_turn(self) -> Result<Turn, AssistantError> {
        match self.role.parse::<Role>() {
            Ok(Role::Assistant) => Ok(Turn::assistant(self.content)),
            _ => Err(AssistantError::UnexpectedRole(self.role)),
        }
    }
}
