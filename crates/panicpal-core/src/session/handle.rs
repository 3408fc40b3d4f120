//! Shared handle to a session.
//!
//! Front ends that drive the session from more than one task hold a
//! `SessionHandle`. Only one submit may be pending at a time; a second one is
//! answered with [`SubmitOutcome::Busy`] instead of queueing. Tearing the
//! handle down cancels a pending submit, so it never waits on the network.

use std::sync::Arc;

use panicpal_types::conversation::Turn;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::orchestrator::SessionOrchestrator;
use super::{SessionError, SessionView, SubmitOutcome};
use crate::storage::kv_store::KvStore;

pub struct SessionHandle<K: KvStore> {
    inner: Arc<Mutex<SessionOrchestrator<K>>>,
    views: watch::Receiver<SessionView>,
    shutdown: CancellationToken,
}

impl<K: KvStore> Clone for SessionHandle<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            views: self.views.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<K: KvStore> SessionHandle<K> {
    pub fn new(orchestrator: SessionOrchestrator<K>) -> Self {
        let views = orchestrator.subscribe();
        Self {
            inner: Arc::new(Mutex::new(orchestrator)),
            views,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.views.clone()
    }

    /// The latest published view.
    pub fn view(&self) -> SessionView {
        self.views.borrow().clone()
    }

    pub async fn initialize(&self) {
        self.inner.lock().await.initialize().await;
    }

    /// Submit text, or return `Busy` if a submit is already pending.
    ///
    /// Returns `Cancelled` if the handle is torn down before the reply
    /// arrives. Dropping the submit future drops the loading timer with it.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let Ok(mut session) = self.inner.try_lock() else {
            debug!("Submit rejected, another reply is pending");
            return Ok(SubmitOutcome::Busy);
        };

        tokio::select! {
            biased;
            outcome = session.submit(text) => outcome,
            _ = self.shutdown.cancelled() => {
                debug!("Submit cancelled by teardown");
                Ok(SubmitOutcome::Cancelled)
            }
        }
    }

    /// Start a new conversation. Returns `false`, changing nothing, while a
    /// reply is pending.
    pub async fn clear_history(&self) -> bool {
        let Ok(mut session) = self.inner.try_lock() else {
            debug!("Clear rejected, a reply is pending");
            return false;
        };
        session.clear_history().await;
        true
    }

    pub async fn turns(&self) -> Vec<Turn> {
        self.inner.lock().await.turns()
    }

    /// Cancel any pending submit, then sweep its loading turn and mark the
    /// session not ready. Submits on this handle and its clones are
    /// cancelled from here on.
    pub async fn teardown(&self) {
        self.shutdown.cancel();
        self.inner.lock().await.teardown();
    }
}
