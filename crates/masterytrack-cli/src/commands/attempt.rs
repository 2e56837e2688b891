use clap::Args;

#[derive(Args)]
pub struct AttemptArgs {
    /// Skill identifier
    skill_id: String,
    #[command(flatten)]
    outcome: Outcome,
    /// Response time in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    latency_ms: f64,
    /// Hints used before answering
    #[arg(long)]
    hints: Option<u32>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Outcome {
    /// The answer was correct
    #[arg(long)]
    correct: bool,
    /// The answer was wrong
    #[arg(long)]
    incorrect: bool,
}

pub fn run(args: AttemptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, _) = super::open_engine()?;
    let correct = args.outcome.correct && !args.outcome.incorrect;
    let event = engine.record_attempt(&args.skill_id, correct, args.latency_ms, args.hints)?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    engine.dispose()?;
    Ok(())
}
