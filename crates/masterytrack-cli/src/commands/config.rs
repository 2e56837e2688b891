use clap::Subcommand;
use masterytrack_core::{Config, ConfigError};

/// Keys are dot paths into `config.toml`:
///
/// - `engine.flush_debounce_ms`: quiet period before attempts are saved
/// - `planner.weekly_plan_limit`: most skills a weekly plan recommends
/// - `planner.low_coverage_attempts`: skills with fewer attempts get
///   recommended even when not due
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `planner.weekly_plan_limit`
    Get { key: String },
    /// Change one value and save the file
    Set {
        key: String,
        /// Non-negative integer for every current key
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite `config.toml` with the defaults and print them
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        }
    }
    Ok(())
}
