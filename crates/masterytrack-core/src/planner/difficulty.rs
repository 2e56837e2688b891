use serde::{Deserialize, Serialize};

use crate::mastery::SkillMastery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyVariant {
    /// Skill never attempted.
    Baseline,
    Scaffolded,
    Standard,
    Challenge,
}

/// Problem sizing handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub variant: DifficultyVariant,
    pub range: u32,
}

pub fn compute_difficulty(record: Option<&SkillMastery>) -> Difficulty {
    let (variant, range) = match record.map(|r| r.level) {
        None => (DifficultyVariant::Baseline, 10),
        Some(level) if level < 2 => (DifficultyVariant::Scaffolded, 8),
        Some(level) if level < 4 => (DifficultyVariant::Standard, 12),
        Some(_) => (DifficultyVariant::Challenge, 15),
    };
    Difficulty { variant, range }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_level(level: u8) -> SkillMastery {
        let mut rec = SkillMastery::baseline("s", 100.0, 0);
        rec.level = level;
        rec
    }

    #[test]
    fn maps_levels_to_variants() {
        let cases = [
            (0, DifficultyVariant::Scaffolded, 8),
            (1, DifficultyVariant::Scaffolded, 8),
            (2, DifficultyVariant::Standard, 12),
            (3, DifficultyVariant::Standard, 12),
            (4, DifficultyVariant::Challenge, 15),
            (5, DifficultyVariant::Challenge, 15),
        ];
        for (level, variant, range) in cases {
            let d = compute_difficulty(Some(&at_level(level)));
            assert_eq!(d, Difficulty { variant, range }, "level {level}");
        }
    }

    #[test]
    fn unknown_skill_gets_baseline() {
        let d = compute_difficulty(None);
        assert_eq!(d.variant, DifficultyVariant::Baseline);
        assert_eq!(d.range, 10);
        assert_eq!(serde_json::to_value(d).unwrap()["variant"], "baseline");
    }
}
