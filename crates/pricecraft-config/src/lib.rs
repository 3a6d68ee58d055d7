//! Configuration models and file loading.
//!
//! This crate owns the PriceCraft config schema, validation, and the json5
//! file loader used by the server binary and embedding front-ends.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// File loading entry points.
pub use loader::{load_config, load_optional_config};
/// Configuration schema models.
pub use model::*;
