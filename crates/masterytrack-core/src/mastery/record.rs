//! Mastery record and attempt types.

use serde::{Deserialize, Serialize};

/// Highest mastery level a skill can reach.
pub const MAX_LEVEL: u8 = 5;

/// Review interval in minutes, indexed by mastery level.
///
/// 5m, 30m, 12h, 2d, 5d, 14d.
pub const REVIEW_STEPS_MIN: [i64; 6] = [5, 30, 720, 2880, 7200, 20160];

pub const MS_PER_MINUTE: i64 = 60_000;

/// Weight kept from the previous latency average.
pub const LATENCY_RETAIN: f64 = 0.7;
/// Weight given to the newest latency sample.
pub const LATENCY_SAMPLE: f64 = 0.3;

/// Accuracy strictly above which a skill may level up.
pub const PROMOTE_ACCURACY: f64 = 85.0;
/// Streak needed alongside [`PROMOTE_ACCURACY`] to level up.
pub const PROMOTE_STREAK: u32 = 3;
/// Accuracy strictly below which a skill levels down.
pub const DEMOTE_ACCURACY: f64 = 60.0;

/// Most hints an answer may use and still count as fully correct.
pub const MAX_CLEAN_HINTS: u32 = 1;

/// Review interval for a level, in milliseconds.
pub fn review_interval_ms(level: u8) -> i64 {
    let idx = usize::from(level.min(MAX_LEVEL));
    REVIEW_STEPS_MIN[idx] * MS_PER_MINUTE
}

/// Rolling mastery estimate for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMastery {
    pub skill_id: String,
    /// 0 = emergent, 5 = mastered.
    pub level: u8,
    /// Lifetime weighted correctness, 0..=100.
    pub accuracy: f64,
    pub avg_latency_ms: f64,
    pub attempts: u32,
    pub streak: u32,
    /// Epoch milliseconds after which the skill is due.
    pub next_review: i64,
    /// Epoch milliseconds of the last applied attempt.
    pub last_updated: i64,
}

impl SkillMastery {
    /// Starting point for a skill that has never been attempted.
    pub fn baseline(skill_id: &str, latency_ms: f64, now_ms: i64) -> Self {
        Self {
            skill_id: skill_id.to_string(),
            level: 0,
            accuracy: 0.0,
            avg_latency_ms: latency_ms,
            attempts: 0,
            streak: 0,
            next_review: now_ms + review_interval_ms(0),
            last_updated: now_ms,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_review <= now_ms
    }

    /// Clamp fields read from storage back into their valid ranges.
    ///
    /// Returns `true` if anything had to change.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.level > MAX_LEVEL {
            self.level = MAX_LEVEL;
            changed = true;
        }
        if !self.accuracy.is_finite() {
            self.accuracy = 0.0;
            changed = true;
        } else if !(0.0..=100.0).contains(&self.accuracy) {
            self.accuracy = self.accuracy.clamp(0.0, 100.0);
            changed = true;
        }
        if !self.avg_latency_ms.is_finite() || self.avg_latency_ms < 0.0 {
            self.avg_latency_ms = 0.0;
            changed = true;
        }
        changed
    }
}

/// One answered practice item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub skill_id: String,
    pub correct: bool,
    pub latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_count: Option<u32>,
    pub timestamp: i64,
}

impl AttemptRecord {
    pub fn new(skill_id: impl Into<String>, correct: bool, latency_ms: f64, timestamp: i64) -> Self {
        Self {
            skill_id: skill_id.into(),
            correct,
            latency_ms,
            hint_count: None,
            timestamp,
        }
    }

    pub fn with_hints(mut self, hint_count: u32) -> Self {
        self.hint_count = Some(hint_count);
        self
    }

    /// Correct with at most one hint.
    pub fn is_clean(&self) -> bool {
        self.correct && self.hint_count.unwrap_or(0) <= MAX_CLEAN_HINTS
    }

    /// Credit toward accuracy: 1.0 clean, 0.5 heavily hinted, 0.0 wrong.
    pub fn effective_correct(&self) -> f64 {
        if !self.correct {
            0.0
        } else if self.is_clean() {
            1.0
        } else {
            0.5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_interval_follows_steps() {
        assert_eq!(review_interval_ms(0), 5 * 60_000);
        assert_eq!(review_interval_ms(1), 30 * 60_000);
        assert_eq!(review_interval_ms(5), 20160 * 60_000);
        // Out-of-range levels use the top step.
        assert_eq!(review_interval_ms(9), review_interval_ms(5));
    }

    #[test]
    fn effective_correct_credits() {
        let base = AttemptRecord::new("add", true, 100.0, 0);
        assert_eq!(base.effective_correct(), 1.0);
        assert_eq!(base.clone().with_hints(1).effective_correct(), 1.0);
        assert_eq!(base.clone().with_hints(2).effective_correct(), 0.5);

        let wrong = AttemptRecord::new("add", false, 100.0, 0).with_hints(0);
        assert_eq!(wrong.effective_correct(), 0.0);
        assert!(!wrong.is_clean());
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let mut rec = SkillMastery::baseline("frac", 200.0, 0);
        rec.level = 9;
        rec.accuracy = 140.0;
        rec.avg_latency_ms = f64::NAN;
        assert!(rec.sanitize());
        assert_eq!(rec.level, 5);
        assert_eq!(rec.accuracy, 100.0);
        assert_eq!(rec.avg_latency_ms, 0.0);
        assert!(!rec.sanitize());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let rec = SkillMastery::baseline("frac", 200.0, 1_000);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["skillId"], "frac");
        assert_eq!(json["avgLatencyMs"], 200.0);
        assert_eq!(json["nextReview"], 1_000 + 5 * 60_000);
        assert_eq!(json["lastUpdated"], 1_000);
    }
}
