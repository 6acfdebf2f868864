//! Drift command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::DriftArgs;
use crate::config::OutputFormat;
use crate::data::{load_dataset, NormalizeOptions};
use crate::eval::{DriftDetector, DriftReport};

/// One line per evaluated feature
pub fn format_report(report: &DriftReport) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<20} {:>10} {:>10}  {}",
        "feature", "statistic", "p-value", "status"
    )];
    for (feature, result) in &report.feature_drifts {
        let status = if result.drift { "DRIFT" } else { "ok" };
        lines.push(format!(
            "  {:<20} {:>10.4} {:>10.4}  {}",
            feature, result.statistic, result.p_value, status
        ));
    }
    lines
}

/// Drifted share of the evaluated features
pub fn format_summary(report: &DriftReport) -> String {
    format!(
        "  Drifted: {}/{} feature(s) ({:.1}%)",
        report.drifted_features().len(),
        report.evaluated(),
        report.drift_percentage()
    )
}

pub fn run_drift(args: DriftArgs, level: LogLevel) -> Result<(), String> {
    for path in [&args.reference, &args.candidate] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()));
        }
    }
    if !(args.threshold > 0.0 && args.threshold < 1.0) {
        return Err(format!(
            "Invalid drift threshold: {} (must be > 0.0 and < 1.0)",
            args.threshold
        ));
    }

    let options = NormalizeOptions::default();
    let reference = load_dataset(&args.reference, &options)
        .map_err(|e| format!("Failed to load {}: {e}", args.reference.display()))?;
    let candidate = load_dataset(&args.candidate, &options)
        .map_err(|e| format!("Failed to load {}: {e}", args.candidate.display()))?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Reference: {} rows, candidate: {} rows",
            reference.len(),
            candidate.len()
        ),
    );

    let report = DriftDetector::new(reference).detect(&candidate, args.threshold);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize report: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Drift Detection Results:");
            log(level, LogLevel::Normal, &format!("  Threshold: {}", report.threshold));
            for line in format_report(&report) {
                log(level, LogLevel::Normal, &line);
            }
            log(level, LogLevel::Normal, &format_summary(&report));
        }
    }

    if report.drift_detected {
        return Err(format!(
            "Drift detected in {}",
            report.drifted_features().join(", ")
        ));
    }

    log(level, LogLevel::Normal, "No drift detected");
    Ok(())
}
