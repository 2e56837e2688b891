use masterytrack_core::{badge_progress, derive_badges};

pub fn run(progress: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, _) = super::open_engine()?;
    let records = engine.snapshot();
    let json = if progress {
        serde_json::to_string_pretty(&badge_progress(records))?
    } else {
        serde_json::to_string_pretty(&derive_badges(records))?
    };
    println!("{json}");
    engine.dispose()?;
    Ok(())
}
