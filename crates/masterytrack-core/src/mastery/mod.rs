mod autosave;
mod debounce;
mod engine;
mod processor;
mod record;
mod store;

pub use autosave::AutosaveEngine;
pub use debounce::{FlushDebouncer, DEFAULT_FLUSH_DEBOUNCE_MS};
pub use engine::MasteryEngine;
pub use processor::{apply_attempt, validate_attempt, AttemptOutcome, LevelChange};
pub use record::{
    review_interval_ms, AttemptRecord, SkillMastery, MAX_LEVEL, MS_PER_MINUTE, REVIEW_STEPS_MIN,
};
pub use store::{SkillMap, SkillStore};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
