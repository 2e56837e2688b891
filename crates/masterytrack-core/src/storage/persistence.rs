//! Persistence adapters for the skill record mapping.
//!
//! The mapping is stored whole, as one JSON object under [`STORAGE_KEY`].
//! Loading never fails: absent or undecodable data reads as an empty map.

use std::sync::{Arc, Mutex};

use super::Database;
use crate::error::StorageError;
use crate::mastery::SkillMap;

/// Fixed key the whole engine state lives under.
pub const STORAGE_KEY: &str = "skill_mastery";

pub trait PersistenceAdapter {
    /// Read the stored mapping, or an empty one if there is nothing usable.
    fn load(&self) -> SkillMap;

    /// Overwrite the stored mapping.
    fn save(&self, records: &SkillMap) -> Result<(), StorageError>;
}

/// Decode a stored blob, logging and discarding anything malformed.
pub fn decode_records(raw: &str) -> SkillMap {
    match serde_json::from_str::<SkillMap>(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("discarding malformed skill records: {}", e);
            SkillMap::new()
        }
    }
}

/// Adapter over the SQLite `kv` table.
pub struct KvPersistence {
    db: Database,
}

impl KvPersistence {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PersistenceAdapter for KvPersistence {
    fn load(&self) -> SkillMap {
        match self.db.kv_get(STORAGE_KEY) {
            Ok(Some(raw)) => decode_records(&raw),
            Ok(None) => SkillMap::new(),
            Err(e) => {
                tracing::warn!("failed to read skill records, starting empty: {}", e);
                SkillMap::new()
            }
        }
    }

    fn save(&self, records: &SkillMap) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        self.db.kv_set(STORAGE_KEY, &json)
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    raw: Option<String>,
    saves: usize,
}

/// In-memory adapter holding the serialized blob.
///
/// Clones share the same slot, so a caller can keep a handle to inspect
/// what an engine saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored blob, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let adapter = Self::new();
        adapter.lock().raw = Some(raw.into());
        adapter
    }

    pub fn with_records(records: SkillMap) -> Self {
        let raw = serde_json::to_string(&records).unwrap_or_default();
        Self::with_raw(raw)
    }

    /// Mapping currently stored, decoded.
    pub fn stored(&self) -> Option<SkillMap> {
        self.lock().raw.as_deref().map(decode_records)
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceAdapter for MemoryPersistence {
    fn load(&self) -> SkillMap {
        self.lock()
            .raw
            .as_deref()
            .map(decode_records)
            .unwrap_or_default()
    }

    fn save(&self, records: &SkillMap) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        let mut slot = self.lock();
        slot.raw = Some(json);
        slot.saves += 1;
        Ok(())
    }
}
