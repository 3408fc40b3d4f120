//! Session orchestrator.
//!
//! Wires the conversation store, persistence gateway, dispatcher and loading
//! indicator into the startup sequence and the single `submit` entry point.
//! Everything runs on the caller's task; the dispatch and the glyph timer are
//! raced with `tokio::select!`.

use panicpal_types::config::AppConfig;
use panicpal_types::conversation::{Conversation, Turn};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{SessionError, SessionView, SubmitOutcome};
use crate::assistant::box_client::BoxAssistantClient;
use crate::assistant::dispatcher::RemoteDispatcher;
use crate::conversation::store::ConversationStore;
use crate::loading::indicator::LoadingIndicator;
use crate::persistence::gateway::PersistenceGateway;
use crate::storage::kv_store::KvStore;

pub struct SessionOrchestrator<K: KvStore> {
    system_prompt: String,
    store: ConversationStore,
    gateway: PersistenceGateway<K>,
    dispatcher: RemoteDispatcher,
    indicator: LoadingIndicator,
    views: watch::Sender<SessionView>,
    ready: bool,
}

impl<K: KvStore> SessionOrchestrator<K> {
    pub fn new(
        system_prompt: impl Into<String>,
        gateway: PersistenceGateway<K>,
        dispatcher: RemoteDispatcher,
        indicator: LoadingIndicator,
    ) -> Self {
        let system_prompt = system_prompt.into();
        let store = ConversationStore::new(Conversation::new(system_prompt.clone()));
        let (views, _) = watch::channel(SessionView::default());

        Self {
            system_prompt,
            store,
            gateway,
            dispatcher,
            indicator,
            views,
            ready: false,
        }
    }

    /// Build a session from application configuration.
    pub fn from_config(config: &AppConfig, kv: K, client: BoxAssistantClient) -> Self {
        Self::new(
            config.system_prompt.clone(),
            PersistenceGateway::new(kv),
            RemoteDispatcher::new(client, config.fallback_message.clone()),
            LoadingIndicator::from_config(&config.loading),
        )
    }

    /// Receive the rendered view whenever it changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.views.subscribe()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The full live list, system turn first.
    pub fn turns(&self) -> Vec<Turn> {
        self.store.turns()
    }

    /// Turns the UI renders.
    pub fn visible_turns(&self) -> Vec<Turn> {
        self.store.visible_turns()
    }

    /// Restore the saved conversation, if any, then signal ready.
    pub async fn initialize(&mut self) {
        match self.gateway.load().await {
            Some(conversation) => {
                info!(turns = conversation.len(), "Restored conversation");
                self.store.replace(conversation);
            }
            None => debug!("Starting a new conversation"),
        }

        self.ready = true;
        self.publish();
    }

    /// Run one exchange: user turn, loading turn, dispatch, reply, save.
    #[tracing::instrument(name = "submit", skip(self, text), fields(chars = text.chars().count()))]
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        if !self.ready {
            return Err(SessionError::NotReady);
        }
        if text.trim().is_empty() {
            debug!("Ignoring empty input");
            return Ok(SubmitOutcome::Rejected);
        }

        // A previous submit dropped mid-flight leaves its loading turn behind
        self.store.remove_loading();

        self.store.append(Turn::user(text))?;
        let mut loading = self.indicator.start(&mut self.store)?;
        self.publish();

        let payload = self.store.snapshot_for_dispatch();
        let resolution = {
            let send = self.dispatcher.send(&payload);
            tokio::pin!(send);
            loop {
                tokio::select! {
                    resolution = &mut send => break resolution,
                    glyph = loading.tick() => {
                        self.store.update_loading_content(&glyph);
                        publish_view(&self.views, &self.store, self.ready);
                    }
                }
            }
        };

        self.indicator.stop(loading, &mut self.store);

        let fallback = resolution.is_fallback();
        let reply = resolution.into_turn();
        self.store.append(reply.clone())?;
        self.publish();

        self.gateway.save(&self.store.snapshot_for_persistence()).await;

        Ok(SubmitOutcome::Completed { reply, fallback })
    }

    /// Forget the conversation: delete the saved record and start over.
    pub async fn clear_history(&mut self) {
        self.gateway.clear().await;
        self.store.replace(Conversation::new(self.system_prompt.clone()));
        self.publish();
    }

    /// Sweep any stale loading turn and mark the session not ready.
    pub fn teardown(&mut self) {
        self.store.remove_loading();
        self.ready = false;
        self.publish();
        debug!("Session torn down");
    }

    fn publish(&self) {
        publish_view(&self.views, &self.store, self.ready);
    }
}

fn publish_view(views: &watch::Sender<SessionView>, store: &ConversationStore, ready: bool) {
    views.send_replace(SessionView {
        ready,
        turns: store.visible_turns(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::client::AssistantClient;
    use crate::storage::memory::InMemoryKvStore;
    use panicpal_types::assistant::{AssistantReply, AssistantRequest};
    use panicpal_types::error::AssistantError;

    struct FixedClient(&'static str);

    impl AssistantClient for FixedClient {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            _request: &AssistantRequest,
        ) -> Result<AssistantReply, AssistantError> {
            Ok(AssistantReply {
                role: "assistant".to_string(),
                content: self.0.to_string(),
            })
        }
    }

    fn session(kv: InMemoryKvStore) -> SessionOrchestrator<InMemoryKvStore> {
        SessionOrchestrator::from_config(
            &AppConfig::default(),
            kv,
            BoxAssistantClient::new(FixedClient("ok")),
        )
    }

    #[tokio::test]
    async fn test_submit_before_initialize_is_error() {
        let mut session = session(InMemoryKvStore::new());
        let err = session.submit("hi").await.unwrap_err();
        assert!(matches!(err, SessionError::NotReady));
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_initialize_publishes_ready() {
        let mut session = session(InMemoryKvStore::new());
        let views = session.subscribe();
        assert!(!views.borrow().ready);

        session.initialize().await;
        assert!(session.is_ready());
        assert!(views.borrow().ready);
        assert!(views.borrow().turns.is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_input_is_rejected() {
        let mut session = session(InMemoryKvStore::new());
        session.initialize().await;

        let outcome = session.submit("  \n\t ").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(session.turns().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_loading_turn_is_swept() {
        let mut session = session(InMemoryKvStore::new());
        session.initialize().await;

        // Simulate an abandoned submit
        session.store.append(Turn::user("lost")).unwrap();
        session.store.append(Turn::loading(".  ")).unwrap();

        session.submit("again").await.unwrap();
        assert!(!session.store.has_loading());
        assert_eq!(
            session.turns(),
            vec![
                Turn::system(panicpal_types::config::DEFAULT_SYSTEM_PROMPT),
                Turn::user("lost"),
                Turn::user("again"),
                Turn::assistant("ok"),
            ]
        );
    }

    #[tokio::test]
    async fn test_clear_history_resets_to_system_turn() {
        let kv = InMemoryKvStore::new();
        let mut session = session(kv.clone());
        session.initialize().await;
        session.submit("hi").await.unwrap();
        assert!(!kv.is_empty());

        session.clear_history().await;
        assert_eq!(session.turns().len(), 1);
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_teardown_marks_not_ready() {
        let mut session = session(InMemoryKvStore::new());
        let views = session.subscribe();
        session.initialize().await;

        session.teardown();
        assert!(!session.is_ready());
        assert!(!views.borrow().ready);
        assert!(matches!(
            session.submit("hi").await,
            Err(SessionError::NotReady)
        ));
    }
}
