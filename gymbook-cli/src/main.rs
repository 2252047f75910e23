use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use dotenvy::dotenv;
use log::{LevelFilter, debug};

use gymbook::Tracker;
use gymbook::config::Config;
use gymbook::logging;
use gymbook::stats::WeightUnit;

mod app;
mod health;
mod tools;
mod training;

use app::App;

#[derive(Parser, Debug)]
#[command(version, about = "Gymbook - workout and health tracker", long_about = None)]
struct Args {
    /// SQLite database path, or :memory:
    #[arg(long, global = true, env = "DATABASE_URL")]
    database: Option<String>,
    /// Unit weights are entered and shown in (kg, lbs, stone)
    #[arg(long, global = true, env = "GYMBOOK_WEIGHT_UNIT")]
    unit: Option<WeightUnit>,
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage workout templates
    #[command(subcommand)]
    Template(training::TemplateCommand),
    /// Log and review workouts
    #[command(subcommand)]
    Workout(training::WorkoutCommand),
    /// Weekly routines mapping days to templates
    #[command(subcommand)]
    Routine(training::RoutineCommand),
    /// Workout plans
    #[command(subcommand)]
    Plan(training::PlanCommand),
    /// Training blocks
    #[command(subcommand)]
    Block(training::BlockCommand),
    /// Body measurements and progress photos
    #[command(subcommand)]
    Measure(health::MeasureCommand),
    /// Supplements and intake logs
    #[command(subcommand)]
    Supplement(health::SupplementCommand),
    /// Mood and energy logs
    #[command(subcommand)]
    Mood(health::MoodCommand),
    /// Reminders
    #[command(subcommand)]
    Reminder(health::ReminderCommand),
    /// Cycles and their compounds
    #[command(subcommand)]
    Cycle(health::CycleCommand),
    /// Weak points
    #[command(subcommand)]
    WeakPoint(health::WeakPointCommand),
    /// Progress of one exercise over time
    Progress {
        exercise: String,
        #[arg(short, long, value_enum, default_value_t = tools::Mode::Weight)]
        mode: tools::Mode,
    },
    /// Best set per exercise
    Records,
    /// Estimated one-rep max for a set
    OneRepMax { weight: f64, reps: u32 },
    /// Convert a weight between units
    Convert {
        value: f64,
        from: WeightUnit,
        to: WeightUnit,
    },
    /// Write every record as JSON to a file or stdout
    Export {
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Replace all records with a previous export
    Import { path: std::path::PathBuf },
    /// Count down a rest period
    Timer { seconds: u64 },
}

fn log_level(verbose: u8, configured: LevelFilter) -> LevelFilter {
    match verbose {
        0 => configured,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(database) = args.database {
        config.database_url = database;
    }
    if let Some(unit) = args.unit {
        config.weight_unit = unit;
    }
    config.log_level = log_level(args.verbose, config.log_level);
    logging::init_logger(config.log_level);
    debug!("Using {:?}", config);

    let tracker = Tracker::open(&config)?;
    let mut app = App::new(tracker, config.weight_unit);

    match args.command {
        Commands::Template(cmd) => cmd.run(&mut app),
        Commands::Workout(cmd) => cmd.run(&mut app),
        Commands::Routine(cmd) => cmd.run(&mut app),
        Commands::Plan(cmd) => cmd.run(&mut app),
        Commands::Block(cmd) => cmd.run(&mut app),
        Commands::Measure(cmd) => cmd.run(&mut app),
        Commands::Supplement(cmd) => cmd.run(&mut app),
        Commands::Mood(cmd) => cmd.run(&mut app),
        Commands::Reminder(cmd) => cmd.run(&mut app),
        Commands::Cycle(cmd) => cmd.run(&mut app),
        Commands::WeakPoint(cmd) => cmd.run(&mut app),
        Commands::Progress { exercise, mode } => tools::progress(&app, &exercise, mode),
        Commands::Records => tools::records(&app),
        Commands::OneRepMax { weight, reps } => tools::one_rep_max(&app, weight, reps),
        Commands::Convert { value, from, to } => tools::convert(value, from, to),
        Commands::Export { output } => tools::export(&app, output.as_deref()),
        Commands::Import { path } => tools::import(&mut app, &path),
        Commands::Timer { seconds } => tools::timer(seconds).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        assert_eq!(log_level(0, LevelFilter::Error), LevelFilter::Error);
        assert_eq!(log_level(1, LevelFilter::Error), LevelFilter::Info);
        assert_eq!(log_level(5, LevelFilter::Off), LevelFilter::Trace);
    }

    #[test]
    fn parses_nested_subcommands() {
        let args = Args::try_parse_from([
            "gymbook",
            "--database",
            ":memory:",
            "workout",
            "log",
            "abc",
            "Bench Press 3x10@60",
        ])
        .unwrap();
        assert_eq!(args.database.as_deref(), Some(":memory:"));
        assert!(matches!(
            args.command,
            Commands::Workout(training::WorkoutCommand::Log { .. })
        ));
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
