//! Landing command line interface

use clap::{Parser, Subcommand};
use landing::logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(name = "landing", about = "Route dropped files into date-partitioned directories")]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also write daily rolling log files to this directory
    #[arg(long, global = true, env = "LANDING_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Match file names against a pattern
    Check {
        /// File name pattern
        #[arg(short, long)]
        pattern: String,

        /// Value substituted for {table}
        #[arg(short, long)]
        table: String,

        /// File names to test
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Load a config file and compile every enabled upload
    Validate {
        /// Path to the TOML config
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Scan source directories and show where each file would go
    Plan {
        /// Path to the TOML config
        #[arg(short, long)]
        config: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Check {
            pattern,
            table,
            names,
        } => cli::check::run(cli::check::CheckArgs {
            pattern,
            table,
            names,
        }),
        Commands::Validate { config } => cli::validate::run(cli::validate::ValidateArgs { config }),
        Commands::Plan { config, json } => cli::plan::run(cli::plan::PlanArgs { config, json }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "landing",
        verbose: cli.verbose,
        log_dir: cli.log_dir.as_deref(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {:#}", err);
            None
        }
    };

    match run_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
