//! # domjson config
//!
//! TOML configuration for the domjson CLI: browser endpoint, filter options,
//! output formatting and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
