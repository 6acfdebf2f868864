//! Canonical training-table schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::table::Value;

pub const DATE: &str = "date";
pub const EC2_HOURS: &str = "ec2_hours";
pub const STORAGE_GB: &str = "storage_gb";
pub const DATA_TRANSFER_GB: &str = "data_transfer_gb";
pub const RDS_USAGE: &str = "rds_usage";
pub const LAMBDA_INVOCATIONS: &str = "lambda_invocations";
pub const DAILY_COST: &str = "daily_cost";

/// Canonical column set, in canonical order
pub const CANONICAL_COLUMNS: [&str; 7] = [
    DATE,
    EC2_HOURS,
    STORAGE_GB,
    DATA_TRANSFER_GB,
    RDS_USAGE,
    LAMBDA_INVOCATIONS,
    DAILY_COST,
];

/// Raw usage features compared by drift detection
pub const USAGE_FEATURES: [&str; 5] =
    [EC2_HOURS, STORAGE_GB, DATA_TRANSFER_GB, RDS_USAGE, LAMBDA_INVOCATIONS];

/// One day of cloud usage and its cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub date: NaiveDate,
    /// Total EC2 compute hours used in the day
    pub ec2_hours: f64,
    /// Average storage consumed in GB
    pub storage_gb: f64,
    /// Outbound data transfer in GB
    pub data_transfer_gb: f64,
    /// Relational database usage units
    pub rds_usage: f64,
    pub lambda_invocations: u64,
    /// Prediction target
    pub daily_cost: f64,
}

impl CanonicalRecord {
    /// Cells in [`CANONICAL_COLUMNS`] order
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Date(self.date),
            Value::Float(self.ec2_hours),
            Value::Float(self.storage_gb),
            Value::Float(self.data_transfer_gb),
            Value::Float(self.rds_usage),
            Value::Int(i64::try_from(self.lambda_invocations).unwrap_or(i64::MAX)),
            Value::Float(self.daily_cost),
        ]
    }
}
