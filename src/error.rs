//! Error types for grantscope
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API;
//! the binary wraps them in `anyhow` at the boundary.

use crate::privilege::PrivilegeSource;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Privilege catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// Lookup failures reported by a privilege catalog
///
/// These indicate that the assignments and the privilege definitions are
/// out of sync; the calculators never try to recover from them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown feature '{feature}'")]
    UnknownFeature { feature: String },

    #[error("Unknown privilege '{privilege}' for feature '{feature}'")]
    UnknownFeaturePrivilege { feature: String, privilege: String },

    #[error("Unknown base privilege '{privilege}'")]
    UnknownBasePrivilege { privilege: String },
}

impl CatalogError {
    pub fn unknown_feature(feature: impl Into<String>) -> Self {
        Self::UnknownFeature {
            feature: feature.into(),
        }
    }

    pub fn unknown_feature_privilege(
        feature: impl Into<String>,
        privilege: impl Into<String>,
    ) -> Self {
        Self::UnknownFeaturePrivilege {
            feature: feature.into(),
            privilege: privilege.into(),
        }
    }

    pub fn unknown_base_privilege(privilege: impl Into<String>) -> Self {
        Self::UnknownBasePrivilege {
            privilege: privilege.into(),
        }
    }
}

/// Errors raised while resolving an effective privilege
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Base actions were requested for a source that does not carry a base
    /// privilege. This is a caller bug in scenario construction.
    #[error("Cannot get base actions for unsupported privilege source {privilege_source}")]
    UnsupportedBaseSource { privilege_source: PrivilegeSource },
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for privilege resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_constructors() {
        let err = CatalogError::unknown_feature("discover");
        assert!(err.to_string().contains("discover"));

        let err = CatalogError::unknown_feature_privilege("discover", "minimal");
        assert!(err.to_string().contains("minimal"));
        assert!(err.to_string().contains("discover"));

        let err = CatalogError::unknown_base_privilege("superuser");
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn test_resolve_error_wraps_catalog_error() {
        let err: ResolveError = CatalogError::unknown_feature("maps").into();
        assert_eq!(err.to_string(), "Unknown feature 'maps'");
    }

    #[test]
    fn test_app_error_from_layers() {
        let err: AppError = ConfigError::Missing {
            field: "role.assignments[0].spaces".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));

        let err: AppError = ResolveError::from(CatalogError::unknown_base_privilege("root")).into();
        assert_eq!(err.to_string(), "Resolution error: Unknown base privilege 'root'");
    }

    #[test]
    fn test_unsupported_base_source_message() {
        let err = ResolveError::UnsupportedBaseSource {
            privilege_source: PrivilegeSource::SpaceFeature,
        };
        assert_eq!(
            err.to_string(),
            "Cannot get base actions for unsupported privilege source SPACE_FEATURE"
        );
    }
}
