//! In-memory skill record store.
//!
//! The single source of truth for one session. Iteration follows insertion
//! order (the order skills were first attempted), which the weekly plan
//! relies on.

use indexmap::IndexMap;

use super::record::SkillMastery;
use crate::storage::PersistenceAdapter;

/// Skill id -> mastery record, in insertion order.
pub type SkillMap = IndexMap<String, SkillMastery>;

#[derive(Debug, Clone, Default)]
pub struct SkillStore {
    records: SkillMap,
}

impl SkillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an already decoded mapping, repairing any
    /// out-of-range records.
    pub fn from_records(records: SkillMap) -> Self {
        let mut cleaned = SkillMap::with_capacity(records.len());
        for (key, mut record) in records {
            if record.skill_id != key {
                tracing::warn!(
                    "stored record under '{}' names skill '{}', re-keying",
                    key,
                    record.skill_id
                );
                record.skill_id = key.clone();
            }
            if record.sanitize() {
                tracing::warn!("clamped out-of-range fields on stored skill '{}'", key);
            }
            cleaned.insert(key, record);
        }
        Self { records: cleaned }
    }

    /// Load from the adapter. Missing or unreadable data yields an empty store.
    pub fn load(adapter: &dyn PersistenceAdapter) -> Self {
        let store = Self::from_records(adapter.load());
        tracing::debug!("loaded {} skill records", store.len());
        store
    }

    pub fn get(&self, skill_id: &str) -> Option<&SkillMastery> {
        self.records.get(skill_id)
    }

    /// Replace the record for `skill_id`, keeping its original position.
    pub fn set(&mut self, skill_id: &str, record: SkillMastery) {
        self.records.insert(skill_id.to_string(), record);
    }

    /// Remove a record, keeping the relative order of the rest.
    pub fn remove(&mut self, skill_id: &str) -> Option<SkillMastery> {
        self.records.shift_remove(skill_id)
    }

    pub fn snapshot(&self) -> &SkillMap {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPersistence;

    fn rec(id: &str) -> SkillMastery {
        SkillMastery::baseline(id, 100.0, 0)
    }

    #[test]
    fn set_get_remove() {
        let mut store = SkillStore::new();
        assert!(store.get("a").is_none());
        store.set("a", rec("a"));
        assert_eq!(store.get("a").map(|r| r.skill_id.as_str()), Some("a"));
        assert!(store.remove("a").is_some());
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn preserves_insertion_order_across_updates_and_removal() {
        let mut store = SkillStore::new();
        for id in ["c", "a", "b", "d"] {
            store.set(id, rec(id));
        }
        let mut updated = rec("a");
        updated.attempts = 3;
        store.set("a", updated);
        store.remove("b");

        let order: Vec<&str> = store.snapshot().keys().map(String::as_str).collect();
        assert_eq!(order, vec!["c", "a", "d"]);
        assert_eq!(store.get("a").unwrap().attempts, 3);
    }

    #[test]
    fn load_rekeys_and_sanitizes() {
        let mut bad = rec("wrong-id");
        bad.level = 7;
        let mut map = SkillMap::new();
        map.insert("right-id".to_string(), bad);

        let adapter = MemoryPersistence::with_records(map);
        let store = SkillStore::load(&adapter);
        let loaded = store.get("right-id").unwrap();
        assert_eq!(loaded.skill_id, "right-id");
        assert_eq!(loaded.level, 5);
    }

    #[test]
    fn load_from_empty_adapter() {
        let store = SkillStore::load(&MemoryPersistence::new());
        assert!(store.is_empty());
    }
}
