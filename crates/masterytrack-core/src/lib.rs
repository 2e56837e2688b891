//! # masterytrack Core Library
//!
//! Mastery tracking and review scheduling for a skill-based tutoring
//! product. For every skill a learner practices the engine keeps a rolling
//! performance estimate, decides when the skill is mastered enough, and
//! schedules when it must be revisited. All update rules are deterministic.
//!
//! ## Architecture
//!
//! - **Mastery Engine**: owns the skill store, applies attempts through a
//!   pure processor, debounces persistence against a wall-clock deadline
//! - **Planner**: pure views over the record set (due list, weekly plan,
//!   badges, difficulty)
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`MasteryEngine`]: Core engine with explicit lifecycle
//! - [`AutosaveEngine`]: Engine wrapper with a tokio-driven debounced flush
//! - [`PersistenceAdapter`]: Trait for load/save of the record mapping
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod mastery;
pub mod planner;
pub mod storage;

pub use error::{AttemptError, ConfigError, CoreError, StorageError};
pub use events::Event;
pub use mastery::{
    apply_attempt, AttemptRecord, AutosaveEngine, LevelChange, MasteryEngine, SkillMap,
    SkillMastery, SkillStore, REVIEW_STEPS_MIN,
};
pub use planner::{
    badge_progress, compute_difficulty, derive_badges, generate_weekly_plan, review_summary,
    Badge, BadgeProgress, Difficulty, DifficultyVariant, PlannerConfig, ReviewSummary,
};
pub use storage::{
    Config, Database, EngineConfig, KvPersistence, MemoryPersistence, PersistenceAdapter,
};
