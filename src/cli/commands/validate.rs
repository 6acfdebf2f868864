//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::ValidateArgs;
use crate::config::{load_config, PipelineSpec};

/// Format data configuration as a string
pub fn format_data_info(spec: &PipelineSpec) -> String {
    let mut lines = vec![format!("  Training data: {}", spec.data.train.display())];
    if let Some(reference) = &spec.data.reference {
        lines.push(format!("  Reference data: {}", reference.display()));
    }
    if let Some(candidate) = &spec.data.candidate {
        lines.push(format!("  Candidate data: {}", candidate.display()));
    }
    lines.join("\n")
}

/// Format normalization settings as a string
pub fn format_normalize_info(spec: &PipelineSpec) -> String {
    let mut lines = vec![
        "  Normalize:".to_string(),
        format!("    Total row label: {}", spec.normalize.total_label),
    ];
    for (field, factor) in spec.normalize.scale.entries() {
        lines.push(format!("    Scale {field}: {factor}"));
    }
    lines.join("\n")
}

/// Format split, drift and model settings as a string
pub fn format_run_info(spec: &PipelineSpec) -> String {
    [
        format!("  Train ratio: {}", spec.split.train_ratio),
        format!("  Drift threshold: {}", spec.drift.threshold),
        format!("  Model: {}", spec.model),
    ]
    .join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &PipelineSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_normalize_info(spec));
    println!();
    println!("{}", format_run_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}
