//! Mastery engine.
//!
//! Owns the skill store and bridges caller events to store mutation. Like a
//! wall-clock timer it has no internal thread: persistence is debounced
//! against a deadline, and the owner calls `tick()` to let a due flush run
//! (or wraps the engine in [`super::AutosaveEngine`] to have tokio do it).
//!
//! ## Lifecycle
//!
//! ```text
//! create -> load -> (record_attempt | reset_skill | tick)* -> dispose
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = MasteryEngine::create(Box::new(adapter), &EngineConfig::default());
//! engine.load();
//! engine.record_attempt("fractions.add", true, 850.0, None)?;
//! // Later, from the event loop:
//! engine.tick()?;
//! engine.dispose()?;
//! ```

use std::path::Path;

use super::debounce::FlushDebouncer;
use super::processor::apply_attempt;
use super::record::{AttemptRecord, SkillMastery};
use super::store::{SkillMap, SkillStore};
use super::{now_ms, LevelChange};
use crate::error::{AttemptError, Result, StorageError};
use crate::events::{ms_to_datetime, Event};
use crate::planner;
use crate::storage::{
    data_dir, Config, Database, EngineConfig, KvPersistence, PersistenceAdapter, CONFIG_FILE,
    DATABASE_FILE,
};

pub struct MasteryEngine {
    store: SkillStore,
    adapter: Box<dyn PersistenceAdapter + Send>,
    debouncer: FlushDebouncer,
    /// Store differs from what the adapter last saved.
    dirty: bool,
}

impl MasteryEngine {
    /// Create an engine with an empty store. Call [`load`](Self::load) to
    /// populate it from the adapter.
    pub fn create(adapter: Box<dyn PersistenceAdapter + Send>, config: &EngineConfig) -> Self {
        Self {
            store: SkillStore::new(),
            adapter,
            debouncer: FlushDebouncer::new(config.flush_debounce_ms),
            dirty: false,
        }
    }

    /// `create` followed by `load`.
    pub fn open(adapter: Box<dyn PersistenceAdapter + Send>, config: &EngineConfig) -> Self {
        let mut engine = Self::create(adapter, config);
        engine.load();
        engine
    }

    /// Open the SQLite store in `dir` with the `config.toml` kept beside it.
    ///
    /// Returns the loaded config too, for the planner settings.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`](crate::CoreError::Config) if the config
    /// file cannot be parsed or written, and
    /// [`CoreError::Storage`](crate::CoreError::Storage) if the database
    /// cannot be opened.
    pub fn open_in(dir: &Path) -> Result<(Self, Config)> {
        let config = Config::load_from(&dir.join(CONFIG_FILE))?;
        let db = Database::open_at(&dir.join(DATABASE_FILE))?;
        let engine = Self::open(Box::new(KvPersistence::new(db)), &config.engine);
        tracing::debug!("opened {} with {} skills", dir.display(), engine.store.len());
        Ok((engine, config))
    }

    /// [`open_in`](Self::open_in) over the data directory.
    ///
    /// # Errors
    /// Same as [`open_in`](Self::open_in), plus a storage error if the data
    /// directory cannot be created.
    pub fn open_default() -> Result<(Self, Config)> {
        Self::open_in(&data_dir()?)
    }

    /// Replace the in-memory store with the persisted one.
    ///
    /// Discards unsaved changes and any pending flush.
    pub fn load(&mut self) {
        self.store = SkillStore::load(self.adapter.as_ref());
        self.debouncer.cancel();
        self.dirty = false;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn get_skill(&self, skill_id: &str) -> Option<&SkillMastery> {
        self.store.get(skill_id)
    }

    pub fn get_due_skills(&self) -> Vec<&SkillMastery> {
        self.get_due_skills_at(now_ms())
    }

    pub fn get_due_skills_at(&self, now_ms: i64) -> Vec<&SkillMastery> {
        planner::due_skills(self.store.snapshot(), now_ms)
    }

    pub fn snapshot(&self) -> &SkillMap {
        self.store.snapshot()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Epoch ms at which the pending flush fires, if one is pending.
    pub fn flush_deadline(&self) -> Option<i64> {
        self.debouncer.deadline()
    }

    pub fn flush_debounce_ms(&self) -> u64 {
        self.debouncer.delay_ms()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one answered item to its skill.
    ///
    /// # Errors
    /// Returns [`AttemptError`] for an empty skill id or a negative or
    /// non-finite latency. The store is left untouched in that case.
    pub fn record_attempt(
        &mut self,
        skill_id: &str,
        correct: bool,
        latency_ms: f64,
        hint_count: Option<u32>,
    ) -> Result<Event, AttemptError> {
        let attempt = AttemptRecord {
            skill_id: skill_id.to_string(),
            correct,
            latency_ms,
            hint_count,
            timestamp: now_ms(),
        };
        self.apply(&attempt)
    }

    /// Apply an attempt using its own timestamp as the current time.
    ///
    /// # Errors
    /// Same as [`record_attempt`](Self::record_attempt).
    pub fn apply(&mut self, attempt: &AttemptRecord) -> Result<Event, AttemptError> {
        let outcome = apply_attempt(self.store.get(&attempt.skill_id), attempt)?;
        let record = outcome.record;

        tracing::debug!(
            "attempt on '{}': correct={} accuracy={:.1} streak={} attempts={}",
            record.skill_id,
            attempt.correct,
            record.accuracy,
            record.streak,
            record.attempts
        );
        if outcome.change != LevelChange::Unchanged {
            tracing::info!(
                "skill '{}' level {} -> {}",
                record.skill_id,
                outcome.previous_level,
                record.level
            );
        }

        let event = Event::AttemptRecorded {
            skill_id: record.skill_id.clone(),
            correct: attempt.correct,
            hint_count: attempt.hint_count,
            first_attempt: outcome.first_attempt,
            previous_level: outcome.previous_level,
            level: record.level,
            level_change: outcome.change,
            accuracy: record.accuracy,
            streak: record.streak,
            attempts: record.attempts,
            next_review: ms_to_datetime(record.next_review),
            at: ms_to_datetime(record.last_updated),
        };

        self.store.set(&attempt.skill_id, record);
        self.mark_dirty(attempt.timestamp);
        Ok(event)
    }

    /// Forget a skill entirely. Unknown ids are a no-op and return `None`.
    pub fn reset_skill(&mut self, skill_id: &str) -> Option<Event> {
        self.reset_skill_at(skill_id, now_ms())
    }

    pub fn reset_skill_at(&mut self, skill_id: &str, now_ms: i64) -> Option<Event> {
        self.store.remove(skill_id)?;
        tracing::info!("reset skill '{}'", skill_id);
        // Cancel the pending flush and start a fresh window for the removal.
        self.debouncer.cancel();
        self.mark_dirty(now_ms);
        Some(Event::SkillReset {
            skill_id: skill_id.to_string(),
            at: ms_to_datetime(now_ms),
        })
    }

    /// Run the debounced flush if its deadline has passed.
    ///
    /// # Errors
    /// Returns the adapter's error if saving fails; the store stays dirty
    /// and is retried on the next mutation or on dispose.
    pub fn tick(&mut self) -> Result<Option<Event>, StorageError> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_ms: i64) -> Result<Option<Event>, StorageError> {
        if !self.debouncer.take_due(now_ms) {
            return Ok(None);
        }
        self.flush_at(now_ms).map(Some)
    }

    /// Save the current snapshot immediately and clear any pending flush.
    ///
    /// # Errors
    /// Returns the adapter's error if saving fails.
    pub fn flush(&mut self) -> Result<Event, StorageError> {
        self.flush_at(now_ms())
    }

    fn flush_at(&mut self, now_ms: i64) -> Result<Event, StorageError> {
        self.debouncer.cancel();
        if let Err(e) = self.adapter.save(self.store.snapshot()) {
            tracing::warn!("failed to persist skill records: {}", e);
            return Err(e);
        }
        self.dirty = false;
        tracing::debug!("persisted {} skill records", self.store.len());
        Ok(Event::Flushed {
            skills: self.store.len(),
            at: ms_to_datetime(now_ms),
        })
    }

    /// Cancel any pending flush and save unsaved changes. Idempotent.
    ///
    /// # Errors
    /// Returns the adapter's error if the final save fails.
    pub fn close(&mut self) -> Result<(), StorageError> {
        self.debouncer.cancel();
        if self.dirty {
            self.flush_at(now_ms())?;
        }
        Ok(())
    }

    /// End of the session: [`close`](Self::close) and drop the engine.
    ///
    /// # Errors
    /// Returns the adapter's error if the final save fails.
    pub fn dispose(mut self) -> Result<(), StorageError> {
        self.close()
    }

    fn mark_dirty(&mut self, now_ms: i64) {
        self.dirty = true;
        self.debouncer.schedule(now_ms);
    }
}
