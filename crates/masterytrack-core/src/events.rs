use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mastery::LevelChange;

/// Every state change in the engine produces an Event.
/// The presentation layer prints or forwards them; nothing reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AttemptRecorded {
        skill_id: String,
        correct: bool,
        hint_count: Option<u32>,
        first_attempt: bool,
        previous_level: u8,
        level: u8,
        level_change: LevelChange,
        accuracy: f64,
        streak: u32,
        attempts: u32,
        next_review: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SkillReset {
        skill_id: String,
        at: DateTime<Utc>,
    },
    /// The debounced flush wrote the store to the persistence adapter.
    Flushed {
        skills: usize,
        at: DateTime<Utc>,
    },
}

/// Epoch milliseconds to a UTC timestamp; out-of-range values map to the epoch.
pub(crate) fn ms_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let ev = Event::SkillReset {
            skill_id: "frac".into(),
            at: ms_to_datetime(0),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "SkillReset");
        assert_eq!(json["skill_id"], "frac");
    }

    #[test]
    fn converts_epoch_millis() {
        assert_eq!(ms_to_datetime(1_500).timestamp_millis(), 1_500);
    }
}
