//! Configuration module
//!
//! Loads privilege definitions, the role to resolve and logging settings from
//! TOML files and environment variables.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
