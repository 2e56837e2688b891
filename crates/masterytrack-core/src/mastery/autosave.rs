//! Tokio-driven debounced persistence.
//!
//! Wraps a [`MasteryEngine`] so the flush fires on its own. Each mutation
//! aborts the pending flush task and spawns a new one that sleeps for the
//! debounce delay, so only the state after the last mutation in a burst is
//! written.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::engine::MasteryEngine;
use super::record::SkillMastery;
use crate::error::{AttemptError, StorageError};
use crate::events::Event;

pub struct AutosaveEngine {
    engine: Arc<Mutex<MasteryEngine>>,
    pending: StdMutex<Option<JoinHandle<()>>>,
    delay: Duration,
}

impl AutosaveEngine {
    /// Take ownership of a loaded engine. Must be called inside a tokio runtime.
    pub fn new(engine: MasteryEngine) -> Self {
        let delay = Duration::from_millis(engine.flush_debounce_ms());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            pending: StdMutex::new(None),
            delay,
        }
    }

    /// # Errors
    /// Same as [`MasteryEngine::record_attempt`].
    pub async fn record_attempt(
        &self,
        skill_id: &str,
        correct: bool,
        latency_ms: f64,
        hint_count: Option<u32>,
    ) -> Result<Event, AttemptError> {
        let event = {
            let mut engine = self.engine.lock().await;
            engine.record_attempt(skill_id, correct, latency_ms, hint_count)?
        };
        self.reschedule();
        Ok(event)
    }

    pub async fn reset_skill(&self, skill_id: &str) -> Option<Event> {
        let event = self.engine.lock().await.reset_skill(skill_id);
        if event.is_some() {
            self.reschedule();
        }
        event
    }

    pub async fn get_skill(&self, skill_id: &str) -> Option<SkillMastery> {
        self.engine.lock().await.get_skill(skill_id).cloned()
    }

    /// Run a read-only query against the engine.
    pub async fn read<R>(&self, f: impl FnOnce(&MasteryEngine) -> R) -> R {
        let engine = self.engine.lock().await;
        f(&*engine)
    }

    pub fn has_pending_flush(&self) -> bool {
        self.pending_slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Abort any pending flush task, then close the engine.
    ///
    /// # Errors
    /// Returns the adapter's error if the final save fails.
    pub async fn shutdown(self) -> Result<(), StorageError> {
        if let Some(handle) = self.pending_slot().take() {
            handle.abort();
        }
        self.engine.lock().await.close()
    }

    fn reschedule(&self) {
        let engine = Arc::clone(&self.engine);
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut engine = engine.lock().await;
            // The timer is the authority here; the engine's own deadline is
            // measured on a different clock.
            if engine.is_dirty() {
                if let Err(e) = engine.flush() {
                    tracing::warn!("autosave flush failed: {}", e);
                }
            }
        });

        if let Some(previous) = self.pending_slot().replace(task) {
            previous.abort();
        }
    }

    fn pending_slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{EngineConfig, MemoryPersistence};

    fn autosave(mem: &MemoryPersistence) -> AutosaveEngine {
        AutosaveEngine::new(MasteryEngine::open(
            Box::new(mem.clone()),
            &EngineConfig::default(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn flushes_once_after_burst() {
        let mem = MemoryPersistence::new();
        let engine = autosave(&mem);

        for _ in 0..3 {
            engine.record_attempt("add", true, 300.0, None).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(mem.save_count(), 0);
        assert!(engine.has_pending_flush());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(mem.save_count(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mem.save_count(), 1);
        assert_eq!(mem.stored().unwrap()["add"].attempts, 3);
        assert!(!engine.read(|e| e.is_dirty()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_timer_and_saves() {
        let mem = MemoryPersistence::new();
        let engine = autosave(&mem);
        engine.record_attempt("add", false, 300.0, Some(2)).await.unwrap();

        engine.shutdown().await.unwrap();
        assert_eq!(mem.save_count(), 1);

        // The aborted task never writes again.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(mem.save_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_of_unknown_skill_schedules_nothing() {
        let mem = MemoryPersistence::new();
        let engine = autosave(&mem);
        assert!(engine.reset_skill("ghost").await.is_none());
        assert!(!engine.has_pending_flush());
        assert!(engine.get_skill("ghost").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_attempt_schedules_nothing() {
        let mem = MemoryPersistence::new();
        let engine = autosave(&mem);
        assert!(engine.record_attempt("", true, 10.0, None).await.is_err());
        assert!(!engine.has_pending_flush());
    }
}
