use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "masterytrack", version, about = "Skill mastery tracking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one answered practice item
    Attempt(commands::attempt::AttemptArgs),
    /// Inspect or reset individual skills
    Skill {
        #[command(subcommand)]
        action: commands::skill::SkillAction,
    },
    /// Skills due for review, soonest first
    Due,
    /// Recommended skills for the coming week
    Plan,
    /// Per-level counts and review backlog
    Summary,
    /// Earned badges
    Badges {
        /// Show progress toward every badge
        #[arg(long)]
        progress: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    logging::init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Attempt(args) => commands::attempt::run(args),
        Commands::Skill { action } => commands::skill::run(action),
        Commands::Due => commands::review::due(),
        Commands::Plan => commands::review::plan(),
        Commands::Summary => commands::review::summary(),
        Commands::Badges { progress } => commands::badges::run(progress),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
