//! Loading indicator controller.
//!
//! `start` inserts the loading turn and hands back a [`LoadingHandle`] that
//! owns the animation timer. The timer lives and dies with the handle, so a
//! dropped handle can never touch the conversation again.

use std::sync::Arc;
use std::time::Duration;

use panicpal_types::config::{DEFAULT_LOADING_GLYPHS, DEFAULT_LOADING_INITIAL, LoadingConfig};
use panicpal_types::conversation::Turn;
use panicpal_types::error::ConversationError;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::conversation::store::ConversationStore;

/// Shortest accepted glyph period.
pub const MIN_LOADING_INTERVAL: Duration = Duration::from_millis(50);

/// Builds loading turns and their animation timers.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    initial: String,
    glyphs: Arc<[String]>,
    interval: Duration,
}

impl LoadingIndicator {
    /// Build from configuration. The interval is clamped to
    /// [`MIN_LOADING_INTERVAL`]; empty glyph settings use the defaults.
    pub fn from_config(config: &LoadingConfig) -> Self {
        let initial = if config.initial.is_empty() {
            DEFAULT_LOADING_INITIAL.to_string()
        } else {
            config.initial.clone()
        };

        let glyphs: Arc<[String]> = if config.glyphs.is_empty() {
            DEFAULT_LOADING_GLYPHS.iter().map(|g| g.to_string()).collect()
        } else {
            config.glyphs.iter().cloned().collect()
        };

        let interval = Duration::from_millis(config.interval_ms).max(MIN_LOADING_INTERVAL);

        Self {
            initial,
            glyphs,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Insert the loading turn and start its timer.
    ///
    /// The first tick fires one full period after this call.
    pub fn start(&self, store: &mut ConversationStore) -> Result<LoadingHandle, ConversationError> {
        store.append(Turn::loading(self.initial.clone()))?;

        let mut timer = interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        debug!(interval_ms = self.interval.as_millis() as u64, "Loading indicator started");
        Ok(LoadingHandle {
            timer,
            glyphs: self.glyphs.clone(),
            next: 0,
        })
    }

    /// Cancel the timer and remove the loading turn.
    pub fn stop(&self, handle: LoadingHandle, store: &mut ConversationStore) {
        let ticks = handle.next;
        drop(handle);
        store.remove_loading();
        debug!(ticks, "Loading indicator stopped");
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::from_config(&LoadingConfig::default())
    }
}

/// Owns the animation timer of one pending reply.
#[derive(Debug)]
pub struct LoadingHandle {
    timer: Interval,
    glyphs: Arc<[String]>,
    next: usize,
}

impl LoadingHandle {
    /// Wait for the next period and return the glyph to show.
    ///
    /// Cancel-safe: dropping the future before it completes skips nothing.
    pub async fn tick(&mut self) -> String {
        self.timer.tick().await;
        let glyph = self.glyphs[self.next % self.glyphs.len()].clone();
        self.next += 1;
        glyph
    }

    /// Number of glyphs handed out so far.
    pub fn ticks(&self) -> usize {
        self.next
    }
}
