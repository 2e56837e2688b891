//! Badge derivation.
//!
//! Badges are recomputed from the current records on every call. Nothing is
//! remembered, so a level regression can take a badge away again.

use serde::{Deserialize, Serialize};

use crate::mastery::{SkillMap, MAX_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    FirstSteps,
    FoundationFive,
    IntermediateTen,
    AllSolid,
    TripleMaster,
}

impl Badge {
    /// Evaluation order; also the order results are returned in.
    pub const ALL: [Badge; 5] = [
        Badge::FirstSteps,
        Badge::FoundationFive,
        Badge::IntermediateTen,
        Badge::AllSolid,
        Badge::TripleMaster,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstSteps => "first-steps",
            Badge::FoundationFive => "foundation-five",
            Badge::IntermediateTen => "intermediate-ten",
            Badge::AllSolid => "all-solid",
            Badge::TripleMaster => "triple-master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::FirstSteps => "Reach level 1 on any skill",
            Badge::FoundationFive => "Reach level 2 on five skills",
            Badge::IntermediateTen => "Reach level 3 on ten skills",
            Badge::AllSolid => "Every practiced skill at level 2 or above",
            Badge::TripleMaster => "Fully master three skills",
        }
    }

    /// Level a skill must reach to count toward this badge.
    fn min_level(&self) -> u8 {
        match self {
            Badge::FirstSteps => 1,
            Badge::FoundationFive | Badge::AllSolid => 2,
            Badge::IntermediateTen => 3,
            Badge::TripleMaster => MAX_LEVEL,
        }
    }

    /// Qualifying skills needed; `None` means "all of them".
    fn required_count(&self) -> Option<usize> {
        match self {
            Badge::FirstSteps => Some(1),
            Badge::FoundationFive => Some(5),
            Badge::IntermediateTen => Some(10),
            Badge::AllSolid => None,
            Badge::TripleMaster => Some(3),
        }
    }
}

/// How close the records are to one badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub badge: Badge,
    pub current: usize,
    pub target: usize,
    /// 0..=100
    pub percentage: f64,
    pub unlocked: bool,
}

/// Badges the records currently earn, in [`Badge::ALL`] order.
pub fn derive_badges(records: &SkillMap) -> Vec<Badge> {
    badge_progress(records)
        .into_iter()
        .filter(|p| p.unlocked)
        .map(|p| p.badge)
        .collect()
}

/// Progress toward every badge, in [`Badge::ALL`] order.
pub fn badge_progress(records: &SkillMap) -> Vec<BadgeProgress> {
    Badge::ALL
        .iter()
        .map(|&badge| {
            let current = records
                .values()
                .filter(|r| r.level >= badge.min_level())
                .count();
            // An empty record set must not satisfy "every skill".
            let (target, unlocked) = match badge.required_count() {
                Some(n) => (n, current >= n),
                None => (records.len(), !records.is_empty() && current == records.len()),
            };
            let percentage = if target == 0 {
                0.0
            } else {
                (current as f64 / target as f64 * 100.0).min(100.0)
            };
            BadgeProgress {
                badge,
                current,
                target,
                percentage,
                unlocked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::SkillMastery;

    fn records(levels: &[u8]) -> SkillMap {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| {
                let id = format!("skill-{i}");
                let mut r = SkillMastery::baseline(&id, 100.0, 0);
                r.level = level;
                (id, r)
            })
            .collect()
    }

    #[test]
    fn empty_set_earns_nothing() {
        assert!(derive_badges(&SkillMap::new()).is_empty());
        let progress = badge_progress(&SkillMap::new());
        let all_solid = &progress[3];
        assert_eq!(all_solid.badge, Badge::AllSolid);
        assert!(!all_solid.unlocked);
        assert_eq!(all_solid.percentage, 0.0);
    }

    #[test]
    fn first_steps_and_all_solid() {
        assert_eq!(derive_badges(&records(&[1])), vec![Badge::FirstSteps]);
        assert_eq!(
            derive_badges(&records(&[2, 3])),
            vec![Badge::FirstSteps, Badge::AllSolid]
        );
        assert_eq!(derive_badges(&records(&[0, 0])), Vec::<Badge>::new());
    }

    #[test]
    fn count_thresholds() {
        let five_at_two = records(&[2, 2, 2, 2, 2, 0]);
        assert_eq!(
            derive_badges(&five_at_two),
            vec![Badge::FirstSteps, Badge::FoundationFive]
        );

        let ten_at_three = records(&[3; 10]);
        assert_eq!(
            derive_badges(&ten_at_three),
            vec![
                Badge::FirstSteps,
                Badge::FoundationFive,
                Badge::IntermediateTen,
                Badge::AllSolid
            ]
        );

        let masters = records(&[5, 5, 5]);
        assert!(derive_badges(&masters).contains(&Badge::TripleMaster));
        assert!(!derive_badges(&records(&[5, 5, 4])).contains(&Badge::TripleMaster));
    }

    #[test]
    fn regression_removes_badge() {
        let mut recs = records(&[1]);
        assert_eq!(derive_badges(&recs), vec![Badge::FirstSteps]);
        recs.get_mut("skill-0").unwrap().level = 0;
        assert!(derive_badges(&recs).is_empty());
    }

    #[test]
    fn progress_reports_partial_completion() {
        let progress = badge_progress(&records(&[2, 2, 0]));
        let foundation = progress
            .iter()
            .find(|p| p.badge == Badge::FoundationFive)
            .unwrap();
        assert_eq!(foundation.current, 2);
        assert_eq!(foundation.target, 5);
        assert!((foundation.percentage - 40.0).abs() < 1e-9);

        let first = &progress[0];
        assert_eq!(first.current, 2);
        assert_eq!(first.percentage, 100.0);
    }

    #[test]
    fn badge_ids_match_serialized_form() {
        for badge in Badge::ALL {
            assert_eq!(serde_json::to_value(badge).unwrap(), badge.id());
        }
    }
}
