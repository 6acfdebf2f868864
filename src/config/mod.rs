//! Declarative pipeline configuration
//!
//! A pipeline is described in YAML:
//!
//! ```yaml
//! data:
//!   train: costs.csv
//!   reference: last_month.csv
//!   candidate: this_week.csv
//! normalize:
//!   total_label: Service total
//!   scale:
//!     ec2_hours: 24.0
//! split:
//!   train_ratio: 0.8
//! drift:
//!   threshold: 0.05
//! model: persistence
//! ```
//!
//! Every section but `data` is optional.

pub mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{parse_args, Cli, Command, OutputFormat};
pub use loader::{load_config, parse_config};
pub use schema::{DataConfig, DriftConfig, ModelKind, PipelineSpec, SplitConfig};
pub use validate::{validate_config, ValidationError};
