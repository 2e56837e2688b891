//! Read-only views derived from the skill record set.
//!
//! Everything here is a pure function of a record mapping and, where time
//! matters, an explicit `now_ms`. Nothing is cached between calls.

mod badges;
mod difficulty;
mod summary;
mod weekly_plan;

pub use badges::{badge_progress, derive_badges, Badge, BadgeProgress};
pub use difficulty::{compute_difficulty, Difficulty, DifficultyVariant};
pub use summary::{review_summary, ReviewSummary};
pub use weekly_plan::{generate_weekly_plan, generate_weekly_plan_with};

use serde::{Deserialize, Serialize};

use crate::mastery::{SkillMap, SkillMastery};

/// Tunables for weekly plan construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Maximum number of skills in a weekly plan.
    #[serde(default = "default_weekly_plan_limit")]
    pub weekly_plan_limit: usize,
    /// Skills with fewer attempts than this count as low coverage.
    #[serde(default = "default_low_coverage_attempts")]
    pub low_coverage_attempts: u32,
}

fn default_weekly_plan_limit() -> usize {
    25
}

fn default_low_coverage_attempts() -> u32 {
    5
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weekly_plan_limit: default_weekly_plan_limit(),
            low_coverage_attempts: default_low_coverage_attempts(),
        }
    }
}

/// Records whose review time has passed, in store order.
pub fn due_skills(records: &SkillMap, now_ms: i64) -> Vec<&SkillMastery> {
    records.values().filter(|r| r.is_due(now_ms)).collect()
}
