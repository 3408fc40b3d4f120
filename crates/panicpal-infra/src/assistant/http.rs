//! HttpAssistantClient -- concrete [`AssistantClient`] for the hosted endpoint.
//!
//! POSTs `{ "messages": [...] }` to the configured URL and expects
//! `{ "role": "assistant", "content": "..." }` back. The function key goes in
//! the `code` query parameter; it is held as a [`SecretString`] and never
//! logged.

use secrecy::{ExposeSecret, SecretString};

use panicpal_core::assistant::client::AssistantClient;
use panicpal_types::assistant::{AssistantReply, AssistantRequest};
use panicpal_types::error::AssistantError;

/// Client for the hosted assistant endpoint.
///
/// No request timeout is set: a reply is awaited for as long as the
/// connection stays open.
pub struct HttpAssistantClient {
    client: reqwest::Client,
    endpoint_url: String,
    access_token: Option<SecretString>,
}

impl HttpAssistantClient {
    pub fn new(
        endpoint_url: impl Into<String>,
        access_token: Option<SecretString>,
    ) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("panicpal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AssistantError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.into(),
            access_token,
        })
    }
}

impl AssistantClient for HttpAssistantClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn complete(&self, request: &AssistantRequest) -> Result<AssistantReply, AssistantError> {
        let mut builder = self.client.post(&self.endpoint_url).json(request);
        if let Some(token) = &self.access_token {
            builder = builder.query(&[("code", token.expose_secret())]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AssistantError::Transport(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<AssistantReply>()
            .await
            .map_err(|e| AssistantError::Deserialization(format!("failed to parse reply: {}", e.without_url())))
    }
}
