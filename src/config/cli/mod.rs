//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! costcast validate pipeline.yaml
//! costcast inspect costs.csv --format json
//! costcast features costs.csv --output features.csv
//! costcast drift this_week.csv --reference last_month.csv
//! costcast train pipeline.yaml --model mean
//! ```

mod core;
mod types;

pub use core::{
    apply_overrides, parse_args, Cli, Command, DriftArgs, FeaturesArgs, InspectArgs, TrainArgs,
    ValidateArgs,
};
pub use types::OutputFormat;
