//! AssistantClient trait definition.
//!
//! The single seam between the session and the remote reply service.
//! Implementations live in panicpal-infra (e.g., `HttpAssistantClient`).

use panicpal_types::assistant::{AssistantReply, AssistantRequest};
use panicpal_types::error::AssistantError;

/// Trait for backends that produce assistant replies.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait AssistantClient: Send + Sync {
    /// Human-readable client name, used in logs.
    fn name(&self) -> &str;

    /// Send the full conversation and receive one reply.
    fn complete(
        &self,
        request: &AssistantRequest,
    ) -> impl std::future::Future<Output = Result<AssistantReply, AssistantError>> + Send;
}
