//! Costcast: cloud usage normalization, feature engineering and drift detection
//!
//! The pipeline turns raw cost exports into model-ready data:
//!
//! 1. [`data`]: load a CSV, detect its layout, normalize it to the canonical
//!    daily schema and validate it
//! 2. [`features`]: add lag, trailing-mean and weekend features without
//!    leaking future values
//! 3. [`eval`]: compare newly observed usage against a reference with
//!    per-feature Kolmogorov-Smirnov tests
//! 4. [`train`]: split chronologically and score a baseline regressor
//!
//! # Example
//!
//! ```
//! use costcast::data::{normalize, validate, NormalizeOptions, Table};
//! use costcast::features::engineer;
//!
//! let csv = "\
//! Service,EC2-Other($),S3($),CloudWatch($),Relational Database Service($),Lambda($),Total costs($)
//! Service total,4.0,0.2,0.1,2.0,0.00002,6.3
//! 2024-01-01,2.0,0.1,0.05,1.0,0.00001,3.1
//! 2024-01-02,2.0,0.1,0.05,1.0,0.00001,3.2
//! ";
//! let raw = Table::from_csv_reader(csv.as_bytes())?;
//! let table = normalize(&raw, &NormalizeOptions::default())?;
//! validate(&table)?;
//!
//! let features = engineer(&table)?;
//! assert_eq!(features.len(), 2);
//! assert_eq!(features.numeric_column("ec2_hours").unwrap()[0], 48.0);
//! # Ok::<(), costcast::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod features;
pub mod train;

pub use error::{Error, Result};
