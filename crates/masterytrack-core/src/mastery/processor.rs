//! Attempt processor.
//!
//! Pure update rule: `(prior record, attempt) -> next record`. No I/O and no
//! clock access; the attempt's own timestamp is "now".
//!
//! ## Level transitions
//!
//! ```text
//! accuracy > 85 && streak >= 3 && level < 5  -> level + 1
//! else accuracy < 60 && level > 0            -> level - 1
//! ```
//!
//! The promotion test runs first and wins any tie.

use serde::{Deserialize, Serialize};

use super::record::{
    review_interval_ms, AttemptRecord, SkillMastery, DEMOTE_ACCURACY, LATENCY_RETAIN,
    LATENCY_SAMPLE, MAX_LEVEL, PROMOTE_ACCURACY, PROMOTE_STREAK,
};
use crate::error::AttemptError;

/// Direction of a level transition caused by one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelChange {
    Promoted,
    Demoted,
    Unchanged,
}

/// Result of applying one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub record: SkillMastery,
    pub previous_level: u8,
    pub change: LevelChange,
    /// True if no prior record existed.
    pub first_attempt: bool,
}

/// Reject attempts that would corrupt the running averages.
pub fn validate_attempt(attempt: &AttemptRecord) -> Result<(), AttemptError> {
    if attempt.skill_id.trim().is_empty() {
        return Err(AttemptError::EmptySkillId);
    }
    if !attempt.latency_ms.is_finite() || attempt.latency_ms < 0.0 {
        return Err(AttemptError::InvalidLatency(attempt.latency_ms));
    }
    Ok(())
}

/// Compute the next mastery record for `attempt`.
///
/// # Errors
/// Returns [`AttemptError`] if the attempt fails [`validate_attempt`].
pub fn apply_attempt(
    prior: Option<&SkillMastery>,
    attempt: &AttemptRecord,
) -> Result<AttemptOutcome, AttemptError> {
    validate_attempt(attempt)?;

    let now = attempt.timestamp;
    let first_attempt = prior.is_none();
    let base = match prior {
        Some(rec) => rec.clone(),
        None => SkillMastery::baseline(&attempt.skill_id, attempt.latency_ms, now),
    };

    let attempts = base.attempts.saturating_add(1);

    // Recover the correct-equivalent count from the stored percentage.
    let prior_correct = base.accuracy * f64::from(base.attempts) / 100.0;
    let accuracy = ((prior_correct + attempt.effective_correct()) / f64::from(attempts) * 100.0)
        .clamp(0.0, 100.0);

    let streak = if attempt.is_clean() {
        base.streak.saturating_add(1)
    } else {
        0
    };

    let avg_latency_ms = base.avg_latency_ms * LATENCY_RETAIN + attempt.latency_ms * LATENCY_SAMPLE;

    let previous_level = base.level.min(MAX_LEVEL);
    let (level, change) = next_level(previous_level, accuracy, streak);

    let record = SkillMastery {
        skill_id: attempt.skill_id.clone(),
        level,
        accuracy,
        avg_latency_ms,
        attempts,
        streak,
        next_review: now + review_interval_ms(level),
        last_updated: now,
    };

    Ok(AttemptOutcome {
        record,
        previous_level,
        change,
        first_attempt,
    })
}

fn next_level(level: u8, accuracy: f64, streak: u32) -> (u8, LevelChange) {
    if accuracy > PROMOTE_ACCURACY && streak >= PROMOTE_STREAK && level < MAX_LEVEL {
        (level + 1, LevelChange::Promoted)
    } else if accuracy < DEMOTE_ACCURACY && level > 0 {
        (level - 1, LevelChange::Demoted)
    } else {
        (level, LevelChange::Unchanged)
    }
}
