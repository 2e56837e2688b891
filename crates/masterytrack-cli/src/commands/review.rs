use masterytrack_core::mastery::now_ms;
use masterytrack_core::planner::generate_weekly_plan_with;
use masterytrack_core::review_summary;

pub fn due() -> Result<(), Box<dyn std::error::Error>> {
    let (engine, _) = super::open_engine()?;
    let mut due = engine.get_due_skills();
    due.sort_by_key(|r| r.next_review);
    println!("{}", serde_json::to_string_pretty(&due)?);
    engine.dispose()?;
    Ok(())
}

pub fn plan() -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = super::open_engine()?;
    let plan = generate_weekly_plan_with(engine.snapshot(), now_ms(), &config.planner);
    println!("{}", serde_json::to_string_pretty(&plan)?);
    engine.dispose()?;
    Ok(())
}

pub fn summary() -> Result<(), Box<dyn std::error::Error>> {
    let (engine, _) = super::open_engine()?;
    let summary = review_summary(engine.snapshot(), now_ms());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    engine.dispose()?;
    Ok(())
}
