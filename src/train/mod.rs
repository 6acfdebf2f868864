//! Training hand-off
//!
//! The model itself is an opaque collaborator behind the [`Regressor`] trait.
//! Two baselines ship with the crate so the pipeline runs end to end:
//!
//! - [`PersistenceRegressor`]: yesterday's cost (`lag_1`)
//! - [`MeanRegressor`]: mean training cost
//!
//! [`evaluate`] fits a model on the earlier rows of a chronological split and
//! reports MAE and RMSE on the later ones.

mod metrics;
mod regressor;


pub use metrics::{Metric, MAE, RMSE};
pub use regressor::{evaluate, EvalReport, MeanRegressor, PersistenceRegressor, Regressor};
