use clap::Subcommand;
use masterytrack_core::compute_difficulty;

#[derive(Subcommand)]
pub enum SkillAction {
    /// Print a skill's mastery record (null if never attempted)
    Show {
        skill_id: String,
    },
    /// Print every tracked skill
    List,
    /// Forget a skill's history
    Reset {
        skill_id: String,
    },
    /// Practice problem sizing for a skill
    Difficulty {
        skill_id: String,
    },
}

pub fn run(action: SkillAction) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, _) = super::open_engine()?;

    match action {
        SkillAction::Show { skill_id } => {
            println!("{}", serde_json::to_string_pretty(&engine.get_skill(&skill_id))?);
        }
        SkillAction::List => {
            let records: Vec<_> = engine.snapshot().values().collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        SkillAction::Reset { skill_id } => match engine.reset_skill(&skill_id) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => {
                let unchanged = serde_json::json!({ "type": "SkillUnknown", "skill_id": skill_id });
                println!("{}", serde_json::to_string_pretty(&unchanged)?);
            }
        },
        SkillAction::Difficulty { skill_id } => {
            let difficulty = compute_difficulty(engine.get_skill(&skill_id));
            println!("{}", serde_json::to_string_pretty(&difficulty)?);
        }
    }

    engine.dispose()?;
    Ok(())
}
