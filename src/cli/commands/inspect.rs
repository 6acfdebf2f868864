//! Inspect command implementation

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::InspectArgs;
use crate::config::OutputFormat;
use crate::data::{normalize, records, validate, Layout, NormalizeOptions, Table};
use crate::error::Result;

/// What a usage export looks like after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub layout: Layout,
    pub raw_rows: usize,
    pub rows: usize,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub total_cost: f64,
    pub mean_daily_cost: f64,
}

impl DatasetSummary {
    pub fn lines(&self) -> Vec<String> {
        let range = match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{start} to {end}"),
            _ => "-".to_string(),
        };
        vec![
            format!("  Layout: {}", self.layout),
            format!("  Rows: {} ({} before normalization)", self.rows, self.raw_rows),
            format!("  Date range: {range}"),
            format!("  Total cost: {:.2}", self.total_cost),
            format!("  Mean daily cost: {:.2}", self.mean_daily_cost),
        ]
    }
}

/// Load, normalize and validate `path`, then summarize it
pub fn summarize(path: &Path, options: &NormalizeOptions) -> Result<DatasetSummary> {
    let raw = Table::from_csv_path(path)?;
    let layout = Layout::detect(raw.columns())?;
    let table = normalize(&raw, options)?;
    validate(&table)?;
    let records = records(&table)?;

    let total_cost: f64 = records.iter().map(|r| r.daily_cost).sum();
    let mean_daily_cost = if records.is_empty() {
        0.0
    } else {
        total_cost / records.len() as f64
    };

    Ok(DatasetSummary {
        layout,
        raw_rows: raw.len(),
        rows: records.len(),
        start: records.iter().map(|r| r.date).min(),
        end: records.iter().map(|r| r.date).max(),
        total_cost,
        mean_daily_cost,
    })
}

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> std::result::Result<(), String> {
    log(
        level,
        LogLevel::Verbose,
        &format!("Inspecting: {}", args.input.display()),
    );

    if !args.input.exists() {
        return Err(format!("File not found: {}", args.input.display()));
    }

    let summary = summarize(&args.input, &NormalizeOptions::default())
        .map_err(|e| format!("Inspection failed: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("Failed to serialize summary: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &format!("Dataset: {}", args.input.display()));
            for line in summary.lines() {
                log(level, LogLevel::Normal, &line);
            }
        }
    }

    Ok(())
}
