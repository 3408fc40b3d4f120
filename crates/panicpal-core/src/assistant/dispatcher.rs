//! Remote dispatcher.
//!
//! Sends the conversation to the assistant client and always resolves with an
//! assistant turn. Any failure becomes the configured fallback turn; the cause
//! is logged and never surfaced to the caller. One request per call, no retry.

use std::time::Instant;

use panicpal_types::assistant::AssistantRequest;
use panicpal_types::conversation::Turn;
use panicpal_types::error::AssistantError;
use tracing::{debug, info, warn};

use super::box_client::BoxAssistantClient;

/// Lifecycle of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Sending,
    Resolved,
}

/// Outcome of a dispatch. Both variants carry an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Reply(Turn),
    Fallback { turn: Turn, reason: String },
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }

    pub fn turn(&self) -> &Turn {
        match self {
            Resolution::Reply(turn) => turn,
            Resolution::Fallback { turn, .. } => turn,
        }
    }

    pub fn into_turn(self) -> Turn {
        match self {
            Resolution::Reply(turn) => turn,
            Resolution::Fallback { turn, .. } => turn,
        }
    }
}

pub struct RemoteDispatcher {
    client: BoxAssistantClient,
    fallback_message: String,
    state: DispatchState,
}

impl RemoteDispatcher {
    pub fn new(client: BoxAssistantClient, fallback_message: impl Into<String>) -> Self {
        Self {
            client,
            fallback_message: fallback_message.into(),
            state: DispatchState::Idle,
        }
    }

    /// State of the most recent dispatch.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Send the turns and resolve a reply or the fallback turn.
    ///
    /// Loading turns are stripped from the request even if the caller passes
    /// them.
    pub async fn send(&mut self, turns: &[Turn]) -> Resolution {
        let request = AssistantRequest::new(turns);
        self.transition(DispatchState::Sending);

        let started = Instant::now();
        let result = self
            .client
            .complete(&request)
            .await
            .and_then(|reply| reply.into_turn());
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let resolution = match result {
            Ok(turn) => {
                info!(
                    client = self.client.name(),
                    messages = request.messages.len(),
                    elapsed_ms,
                    "Assistant replied"
                );
                Resolution::Reply(turn)
            }
            Err(e) => self.fallback(e, elapsed_ms),
        };

        self.transition(DispatchState::Resolved);
        resolution
    }

    fn fallback(&self, error: AssistantError, elapsed_ms: u64) -> Resolution {
        warn!(
            client = self.client.name(),
            error = %error,
            elapsed_ms,
            "Assistant request failed, using fallback reply"
        );
        Resolution::Fallback {
            turn: Turn::assistant(self.fallback_message.clone()),
            reason: error.to_string(),
        }
    }

    fn transition(&mut self, next: DispatchState) {
        debug!(from = ?self.state, to = ?next, "Dispatch state");
        self.state = next;
    }
}
