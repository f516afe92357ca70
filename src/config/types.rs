//! Configuration types for grantscope
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::privilege::AssignmentSpec;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Privilege definitions (the catalog)
    pub definitions: DefinitionsConfig,

    /// Role whose assignments are resolved
    pub role: RoleConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Privilege definitions
///
/// Both lists are ordered from most to least permissive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefinitionsConfig {
    /// Base privileges, not tied to a feature
    pub base: Vec<BasePrivilegeConfig>,

    /// Features and their privileges
    pub features: Vec<FeatureConfig>,
}

impl DefinitionsConfig {
    pub fn with_base(mut self, base: BasePrivilegeConfig) -> Self {
        self.base.push(base);
        self
    }

    pub fn with_feature(mut self, feature: FeatureConfig) -> Self {
        self.features.push(feature);
        self
    }
}

/// A base privilege with its global and per-space action sets
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BasePrivilegeConfig {
    pub id: String,

    /// Actions granted when assigned globally
    pub global: Vec<String>,

    /// Actions granted when assigned within a space
    pub space: Vec<String>,
}

impl BasePrivilegeConfig {
    pub fn new<G, S>(id: impl Into<String>, global: G, space: S) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            id: id.into(),
            global: global.into_iter().map(Into::into).collect(),
            space: space.into_iter().map(Into::into).collect(),
        }
    }
}

/// A feature and its ranked privileges
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub id: String,

    /// Human-readable name
    pub name: Option<String>,

    pub privileges: Vec<FeaturePrivilegeConfig>,
}

impl FeatureConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn privilege<A>(mut self, id: impl Into<String>, actions: A) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
    {
        self.privileges.push(FeaturePrivilegeConfig {
            id: id.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// One feature privilege and the actions it requires
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeaturePrivilegeConfig {
    pub id: String,
    pub actions: Vec<String>,
}

/// Role configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub name: String,

    /// Assignments; the one whose spaces contain `*` is global
    pub assignments: Vec<AssignmentSpec>,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            assignments: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
