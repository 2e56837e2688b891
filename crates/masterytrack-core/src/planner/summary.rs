use serde::{Deserialize, Serialize};

use crate::mastery::{SkillMap, MAX_LEVEL};

/// Aggregate view for a mastery heat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub total_skills: usize,
    /// Skill count per level, index = level.
    pub by_level: [usize; MAX_LEVEL as usize + 1],
    pub due_now: usize,
    /// Earliest review still in the future (epoch ms).
    pub next_due_at: Option<i64>,
}

pub fn review_summary(records: &SkillMap, now_ms: i64) -> ReviewSummary {
    let mut by_level = [0usize; MAX_LEVEL as usize + 1];
    let mut due_now = 0;
    let mut next_due_at: Option<i64> = None;

    for record in records.values() {
        by_level[usize::from(record.level.min(MAX_LEVEL))] += 1;
        if record.is_due(now_ms) {
            due_now += 1;
        } else {
            next_due_at = Some(match next_due_at {
                Some(t) => t.min(record.next_review),
                None => record.next_review,
            });
        }
    }

    ReviewSummary {
        total_skills: records.len(),
        by_level,
        due_now,
        next_due_at,
    }
}
