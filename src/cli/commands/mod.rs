//! CLI command implementations

mod drift;
mod features;
mod inspect;
mod train;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
        Command::Features(args) => features::run_features(args, log_level),
        Command::Drift(args) => drift::run_drift(args, log_level),
        Command::Train(args) => train::run_train(args, log_level),
    }
}
