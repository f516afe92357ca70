//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (GRANTSCOPE__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use crate::privilege::GLOBAL_SPACE;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "grantscope.toml",
    ".grantscope.toml",
    "~/.config/grantscope/config.toml",
    "/etc/grantscope/config.toml",
];

/// Accepted log levels
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with GRANTSCOPE prefix
    // e.g., GRANTSCOPE__LOGGING__LEVEL, GRANTSCOPE__ROLE__NAME
    builder = builder.add_source(
        Environment::with_prefix("GRANTSCOPE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
///
/// Only structural checks happen here; privilege ids are checked when the
/// catalog is built and when assignments are resolved against it.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Invalid {
            message: format!(
                "logging.level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    validate_assignments(config)
}

/// Validate that assignments do not overlap
fn validate_assignments(config: &AppConfig) -> Result<(), ConfigError> {
    let mut owners: HashMap<&str, usize> = HashMap::new();

    for (index, spec) in config.role.assignments.iter().enumerate() {
        if spec.spaces.is_empty() {
            return Err(ConfigError::Missing {
                field: format!("role.assignments[{}].spaces", index),
            });
        }

        if spec.is_global() && spec.spaces.len() > 1 {
            return Err(ConfigError::Invalid {
                message: format!(
                    "role.assignments[{}]: '{}' cannot be combined with other spaces",
                    index, GLOBAL_SPACE
                ),
            });
        }

        for space in &spec.spaces {
            if let Some(previous) = owners.insert(space.as_str(), index)
                && previous != index
            {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "space '{}' is assigned in both role.assignments[{}] and role.assignments[{}]",
                        space, previous, index
                    ),
                });
            }
        }
    }

    Ok(())
}
