//! Costcast CLI
//!
//! # Usage
//!
//! ```bash
//! # Summarize a cost export
//! costcast inspect costs.csv
//!
//! # Write engineered features
//! costcast features costs.csv --output features.csv
//!
//! # Check for drift (exits non-zero when drift is found)
//! costcast drift this_week.csv --reference last_month.csv
//!
//! # Validate config, then run the pipeline
//! costcast validate pipeline.yaml
//! costcast train pipeline.yaml
//! ```

use clap::Parser;
use costcast::cli::{run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.filter()))
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
