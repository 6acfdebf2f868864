//! Raw layout detection and conversion to the canonical schema.
//!
//! Two layouts are recognised:
//!
//! - **Canonical**: already has a `date` column; only the date cells are parsed.
//! - **Service breakdown**: a cost-explorer style export with a `Service` row key,
//!   one dollar-cost column per service and a trailing aggregate row. Dollar
//!   costs are turned into approximate usage metrics with [`ScaleFactors`].

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::record::{
    CANONICAL_COLUMNS, DAILY_COST, DATA_TRANSFER_GB, DATE, EC2_HOURS, LAMBDA_INVOCATIONS,
    RDS_USAGE, STORAGE_GB,
};
use super::table::{Table, Value};

/// Row-key column of the service-breakdown layout
pub const SERVICE: &str = "Service";
/// Label of the aggregate row that must be discarded
pub const DEFAULT_TOTAL_LABEL: &str = "Service total";

pub const EC2_OTHER_COST: &str = "EC2-Other($)";
pub const S3_COST: &str = "S3($)";
pub const CLOUDWATCH_COST: &str = "CloudWatch($)";
pub const RDS_COST: &str = "Relational Database Service($)";
pub const LAMBDA_COST: &str = "Lambda($)";
pub const TOTAL_COST: &str = "Total costs($)";

/// Canonical field and the service-cost column it is derived from
const SERVICE_SOURCES: [(&str, &str); 6] = [
    (EC2_HOURS, EC2_OTHER_COST),
    (STORAGE_GB, S3_COST),
    (DATA_TRANSFER_GB, CLOUDWATCH_COST),
    (RDS_USAGE, RDS_COST),
    (LAMBDA_INVOCATIONS, LAMBDA_COST),
    (DAILY_COST, TOTAL_COST),
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Input table matches no supported layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unrecognized table format: expected a 'date' or 'Service' column, got {headers:?}")]
pub struct FormatError {
    /// Header set of the offending table
    pub headers: Vec<String>,
}

/// Supported raw layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Canonical,
    ServiceBreakdown,
}

impl Layout {
    /// Classify a header set.
    ///
    /// A `Service` column takes precedence over `date`.
    pub fn detect(headers: &[String]) -> Result<Self, FormatError> {
        let has = |name: &str| headers.iter().any(|h| h == name);
        if has(SERVICE) {
            Ok(Layout::ServiceBreakdown)
        } else if has(DATE) {
            Ok(Layout::Canonical)
        } else {
            Err(FormatError {
                headers: headers.to_vec(),
            })
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Canonical => "canonical",
            Layout::ServiceBreakdown => "service-breakdown",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dollar-cost to usage-unit multipliers for the service-breakdown layout.
///
/// Defaults approximate the unit prices the historical data was built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleFactors {
    /// `EC2-Other($)` to compute hours
    pub ec2_hours: f64,
    /// `S3($)` to GB stored
    pub storage_gb: f64,
    /// `CloudWatch($)` to GB transferred
    pub data_transfer_gb: f64,
    /// `Relational Database Service($)` to usage units
    pub rds_usage: f64,
    /// `Lambda($)` to invocation count
    pub lambda_invocations: f64,
    /// `Total costs($)` to daily cost
    pub daily_cost: f64,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self {
            ec2_hours: 24.0,
            storage_gb: 100.0,
            data_transfer_gb: 10.0,
            rds_usage: 1.0,
            lambda_invocations: 1_000_000.0,
            daily_cost: 1.0,
        }
    }
}

impl ScaleFactors {
    /// Factor for a canonical field name
    pub fn for_field(&self, field: &str) -> Option<f64> {
        match field {
            EC2_HOURS => Some(self.ec2_hours),
            STORAGE_GB => Some(self.storage_gb),
            DATA_TRANSFER_GB => Some(self.data_transfer_gb),
            RDS_USAGE => Some(self.rds_usage),
            LAMBDA_INVOCATIONS => Some(self.lambda_invocations),
            DAILY_COST => Some(self.daily_cost),
            _ => None,
        }
    }

    /// All factors keyed by canonical field name
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            (EC2_HOURS, self.ec2_hours),
            (STORAGE_GB, self.storage_gb),
            (DATA_TRANSFER_GB, self.data_transfer_gb),
            (RDS_USAGE, self.rds_usage),
            (LAMBDA_INVOCATIONS, self.lambda_invocations),
            (DAILY_COST, self.daily_cost),
        ]
    }
}

/// Knobs for [`normalize`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Row-key label of the aggregate row to drop
    pub total_label: String,
    /// Dollar-cost multipliers
    pub scale: ScaleFactors,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
            scale: ScaleFactors::default(),
        }
    }
}

/// Detect the layout of `table` and convert it to the canonical schema.
///
/// Pure: the input table is never modified and identical input always yields
/// identical output. Cells that fail date parsing are left as text so that
/// schema validation can report them.
pub fn normalize(table: &Table, options: &NormalizeOptions) -> Result<Table, FormatError> {
    let layout = Layout::detect(table.columns())?;
    log::info!("Detected {layout} layout ({} rows)", table.len());

    let normalized = match layout {
        Layout::Canonical => normalize_canonical(table),
        Layout::ServiceBreakdown => normalize_service_breakdown(table, options),
    };

    log::debug!("Normalized columns: {:?}", normalized.columns());
    Ok(normalized)
}

fn normalize_canonical(table: &Table) -> Table {
    match table.column_index(DATE) {
        Some(idx) => table.map_column(idx, coerce_date),
        None => table.clone(),
    }
}

fn normalize_service_breakdown(table: &Table, options: &NormalizeOptions) -> Table {
    let Some(key_idx) = table.column_index(SERVICE) else {
        return table.clone();
    };

    let label = options.total_label.as_str();
    let kept = table.filter_rows(|row| !is_total_row(&row[key_idx], label));
    let dropped = table.len() - kept.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} aggregate row(s) labelled '{label}'");
    }

    let sources: Vec<(&str, Option<usize>, f64)> = SERVICE_SOURCES
        .iter()
        .map(|&(field, source)| {
            let factor = options.scale.for_field(field).unwrap_or(1.0);
            (field, kept.column_index(source), factor)
        })
        .collect();

    for (field, idx, _) in &sources {
        if idx.is_none() {
            log::debug!("No source column for '{field}', defaulting to 0");
        }
    }

    let rows = kept
        .rows()
        .iter()
        .map(|row| {
            let mut out = Vec::with_capacity(CANONICAL_COLUMNS.len());
            out.push(coerce_date(&row[key_idx]));
            for &(field, idx, factor) in &sources {
                let amount = idx.map_or(0.0, |i| coerce_amount(&row[i]));
                let scaled = amount * factor;
                out.push(if field == LAMBDA_INVOCATIONS {
                    // truncation toward zero, matching an integer cast
                    Value::Int(scaled.trunc() as i64)
                } else {
                    Value::Float(scaled)
                });
            }
            out
        })
        .collect();

    Table::new(CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(), rows)
}

fn is_total_row(key: &Value, label: &str) -> bool {
    matches!(key, Value::Text(s) if s == label)
}

/// Dollar amount of a cell; absent, non-numeric and non-finite cells count as zero
fn coerce_amount(value: &Value) -> f64 {
    value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn coerce_date(value: &Value) -> Value {
    match value {
        Value::Text(s) => parse_date(s).map_or_else(|| value.clone(), Value::Date),
        other => other.clone(),
    }
}

/// Parse a calendar date, discarding any time-of-day component
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
