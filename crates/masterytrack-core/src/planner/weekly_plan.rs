//! Weekly plan construction.
//!
//! A fixed-size work queue, not a priority scheduler: every due skill comes
//! before every low-coverage skill, each group in store order.

use std::collections::HashSet;

use super::PlannerConfig;
use crate::mastery::SkillMap;

pub fn generate_weekly_plan(records: &SkillMap, now_ms: i64) -> Vec<String> {
    generate_weekly_plan_with(records, now_ms, &PlannerConfig::default())
}

pub fn generate_weekly_plan_with(
    records: &SkillMap,
    now_ms: i64,
    config: &PlannerConfig,
) -> Vec<String> {
    let limit = config.weekly_plan_limit;
    let mut plan: Vec<String> = Vec::with_capacity(limit.min(records.len()));
    let mut seen: HashSet<&str> = HashSet::new();

    let due = records.values().filter(|r| r.is_due(now_ms));
    let low_coverage = records
        .values()
        .filter(|r| r.attempts < config.low_coverage_attempts);

    for record in due.chain(low_coverage) {
        if plan.len() >= limit {
            break;
        }
        if seen.insert(record.skill_id.as_str()) {
            plan.push(record.skill_id.clone());
        }
    }
    plan
}
