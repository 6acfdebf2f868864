//! Configuration validation
//!
//! Validates pipeline specifications before any data is read.

mod error;
mod validator;


pub use error::ValidationError;
pub use validator::validate_config;
