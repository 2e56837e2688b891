pub mod attempt;
pub mod badges;
pub mod config;
pub mod review;
pub mod skill;

use masterytrack_core::{Config, MasteryEngine};

/// Open the engine over the on-disk store for one command.
///
/// Callers finish with `dispose()` so the final state is written before exit.
pub fn open_engine() -> Result<(MasteryEngine, Config), Box<dyn std::error::Error>> {
    Ok(MasteryEngine::open_default()?)
}
