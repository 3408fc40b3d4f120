//! BoxAssistantClient -- object-safe dynamic dispatch wrapper for AssistantClient.
//!
//! 1. `AssistantClientDyn` is the object-safe form with boxed futures
//! 2. Blanket impl of `AssistantClientDyn` for all `T: AssistantClient`
//! 3. `BoxAssistantClient` wraps `Box<dyn AssistantClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use panicpal_types::assistant::{AssistantReply, AssistantRequest};
use panicpal_types::error::AssistantError;

use super::client::AssistantClient;

/// Object-safe version of [`AssistantClient`] with boxed futures.
pub trait AssistantClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a AssistantRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AssistantReply, AssistantError>> + Send + 'a>>;
}

impl<T: AssistantClient> AssistantClientDyn for T {
    fn name(&self) -> &str {
        AssistantClient::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a AssistantRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AssistantReply, AssistantError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased assistant client.
///
/// Lets the binary pick the HTTP client or a scripted one at runtime while
/// the dispatcher stays non-generic.
pub struct BoxAssistantClient {
    inner: Box<dyn AssistantClientDyn + Send + Sync>,
}

impl BoxAssistantClient {
    pub fn new<T: AssistantClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn complete(
        &self,
        request: &AssistantRequest,
    ) -> Result<AssistantReply, AssistantError> {
        self.inner.complete_boxed(request).await
    }
}

impl AssistantClient for BoxAssistantClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
        self.inner.complete_boxed(request).await
    }
}
