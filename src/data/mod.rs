//! Raw usage data: tables, layout normalization and schema validation
//!
//! Loading order is always load → [`normalize`] → [`validate`]; see
//! [`load_dataset`] for the combined entry point.

mod normalize;
mod record;
mod schema;
mod table;

use std::path::Path;

pub use normalize::{
    normalize, parse_date, FormatError, Layout, NormalizeOptions, ScaleFactors,
    CLOUDWATCH_COST, DEFAULT_TOTAL_LABEL, EC2_OTHER_COST, LAMBDA_COST, RDS_COST, S3_COST,
    SERVICE, TOTAL_COST,
};
pub use record::{
    CanonicalRecord, CANONICAL_COLUMNS, DAILY_COST, DATA_TRANSFER_GB, DATE, EC2_HOURS,
    LAMBDA_INVOCATIONS, RDS_USAGE, STORAGE_GB, USAGE_FEATURES,
};
pub use schema::{
    records, validate, ColumnFailure, ColumnRule, ColumnType, Problem, SchemaViolation,
    CANONICAL_SCHEMA,
};
pub use table::{Table, Value, DATE_FORMAT};

use crate::error::Result;

/// Load a CSV file, normalize its layout and validate the canonical schema
pub fn load_dataset(path: impl AsRef<Path>, options: &NormalizeOptions) -> Result<Table> {
    let raw = Table::from_csv_path(path)?;
    let table = normalize(&raw, options)?;
    validate(&table)?;
    Ok(table)
}
