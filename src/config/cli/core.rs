//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::schema::{ModelKind, PipelineSpec};

/// Costcast: cloud usage normalization, feature engineering and drift checks
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "costcast")]
#[command(version)]
#[command(about = "Normalize cloud cost exports, engineer forecasting features and detect drift")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a pipeline configuration file
    Validate(ValidateArgs),

    /// Load, normalize and validate a usage export, then summarize it
    Inspect(InspectArgs),

    /// Write the engineered feature table for a usage export
    Features(FeaturesArgs),

    /// Compare a candidate export against a reference export
    Drift(DriftArgs),

    /// Run the full pipeline and score a baseline model
    Train(TrainArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Path to a CSV usage export
    #[arg(value_name = "DATA")]
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the features command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct FeaturesArgs {
    /// Path to a CSV usage export
    #[arg(value_name = "DATA")]
    pub input: PathBuf,

    /// Write the feature table here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DriftArgs {
    /// Newly observed usage export
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Reference usage export
    #[arg(short, long)]
    pub reference: PathBuf,

    /// p-value below which a feature counts as drifted
    #[arg(short, long, default_value = "0.05")]
    pub threshold: f64,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override the train ratio
    #[arg(long)]
    pub train_ratio: Option<f64>,

    /// Override the baseline model (persistence, mean)
    #[arg(short, long)]
    pub model: Option<ModelKind>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a PipelineSpec
pub fn apply_overrides(spec: &mut PipelineSpec, args: &TrainArgs) {
    if let Some(ratio) = args.train_ratio {
        spec.split.train_ratio = ratio;
    }
    if let Some(model) = args.model {
        spec.model = model;
    }
}
