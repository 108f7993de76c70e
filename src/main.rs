use chrono::Local;
use clap::Parser;
use energy_tracker::{
    commands::{self, parse_date_arg, Command},
    errors::AppError,
    load_entries, Config,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "energy_tracker", version, about = "Energy log analytics")]
struct Cli {
    /// Entries export to read (overrides ENERGY_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Analyse as of this date instead of today
    #[arg(long, global = true)]
    today: Option<String>,
    /// Monthly goal score, 1-5 (overrides ENERGY_MONTHLY_GOAL)
    #[arg(long, global = true)]
    goal: Option<f64>,
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(cli, &mut config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            err.exit_code()
        }
    }
}

fn run(cli: Cli, config: &mut Config) -> Result<(), AppError> {
    if let Some(path) = cli.data {
        config.data_path = path;
    }
    if let Some(goal) = cli.goal {
        config.set_monthly_goal(goal)?;
    }
    let today = match cli.today.as_deref() {
        Some(text) => parse_date_arg(text)?,
        None => Local::now().date_naive(),
    };

    let entries = load_entries(&config.data_path)?;
    let value = commands::run(&cli.command, &entries, today, config)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    info!(command = cli.command.name(), "done");
    Ok(())
}
