//! Integration tests for the engine against the SQLite kv store.

use masterytrack_core::mastery::MS_PER_MINUTE;
use masterytrack_core::storage::STORAGE_KEY;
use masterytrack_core::{
    compute_difficulty, derive_badges, generate_weekly_plan, AttemptRecord, Badge, Database,
    DifficultyVariant, EngineConfig, KvPersistence, MasteryEngine,
};

const T0: i64 = 1_700_000_000_000;

fn open_engine(path: &std::path::Path) -> MasteryEngine {
    let db = Database::open_at(path).unwrap();
    MasteryEngine::open(Box::new(KvPersistence::new(db)), &EngineConfig::default())
}

#[test]
fn practice_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("masterytrack.db");

    let mut engine = open_engine(&path);
    let mut t = T0;
    for skill in ["fractions.add", "fractions.sub", "decimals.round"] {
        for _ in 0..3 {
            engine
                .apply(&AttemptRecord::new(skill, true, 900.0, t))
                .unwrap();
            t += 1_000;
        }
    }
    engine
        .apply(&AttemptRecord::new("geometry.area", false, 4_000.0, t))
        .unwrap();

    // Quiet period elapses; the whole burst lands in one write.
    assert!(engine.tick_at(t + 400).unwrap().is_some());
    drop(engine);

    let engine = open_engine(&path);
    let snapshot = engine.snapshot();
    let order: Vec<&str> = snapshot.keys().map(String::as_str).collect();
    assert_eq!(
        order,
        vec!["fractions.add", "fractions.sub", "decimals.round", "geometry.area"]
    );
    assert_eq!(snapshot["fractions.add"].level, 1);
    assert_eq!(snapshot["geometry.area"].accuracy, 0.0);

    assert_eq!(derive_badges(snapshot), vec![Badge::FirstSteps]);
    assert_eq!(
        compute_difficulty(engine.get_skill("fractions.add")).variant,
        DifficultyVariant::Scaffolded
    );
    assert_eq!(
        compute_difficulty(engine.get_skill("unknown")).variant,
        DifficultyVariant::Baseline
    );

    // geometry.area is due after 5 minutes, the level-1 skills after 30.
    let plan = generate_weekly_plan(snapshot, t + 6 * MS_PER_MINUTE);
    assert_eq!(plan[0], "geometry.area");
    assert_eq!(plan.len(), 4);
}

#[test]
fn corrupt_blob_is_treated_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("masterytrack.db");
    Database::open_at(&path)
        .unwrap()
        .kv_set(STORAGE_KEY, "{\"truncated\": ")
        .unwrap();

    let mut engine = open_engine(&path);
    assert!(engine.snapshot().is_empty());

    engine
        .apply(&AttemptRecord::new("a", true, 10.0, T0))
        .unwrap();
    engine.dispose().unwrap();

    let engine = open_engine(&path);
    assert_eq!(engine.get_skill("a").unwrap().attempts, 1);
}

#[test]
fn reset_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("masterytrack.db");

    let mut engine = open_engine(&path);
    engine.apply(&AttemptRecord::new("a", true, 10.0, T0)).unwrap();
    engine.apply(&AttemptRecord::new("b", true, 10.0, T0)).unwrap();
    engine.flush().unwrap();
    engine.reset_skill("a").unwrap();
    engine.dispose().unwrap();

    let engine = open_engine(&path);
    assert!(engine.get_skill("a").is_none());
    assert!(engine.get_skill("b").is_some());
}
