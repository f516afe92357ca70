//! Privilege catalog
//!
//! Maps base and feature privileges to the concrete actions they grant.

use crate::config::DefinitionsConfig;
use crate::error::{CatalogError, ConfigError};
use std::collections::{HashMap, HashSet};

/// Lookup of privileges and the actions they grant
///
/// Results must stay stable for the lifetime of a calculation.
pub trait PrivilegeCatalog: Send + Sync {
    /// Base privileges, most permissive first
    fn base_privileges(&self) -> &[String];

    /// Actions granted by a base privilege assigned globally
    fn global_base_actions(&self, privilege: &str) -> Result<&[String], CatalogError>;

    /// Actions granted by a base privilege assigned within a space
    fn space_base_actions(&self, privilege: &str) -> Result<&[String], CatalogError>;

    /// All feature ids, in definition order
    fn feature_ids(&self) -> Vec<&str>;

    /// Privileges of a feature, most permissive first
    fn feature_privileges(&self, feature: &str) -> Result<&[String], CatalogError>;

    /// Actions granted by a feature privilege
    fn feature_actions(&self, feature: &str, privilege: &str) -> Result<&[String], CatalogError>;
}

/// In-memory privilege catalog built from configuration
#[derive(Debug, Default)]
pub struct PrivilegeDefinition {
    base_ids: Vec<String>,
    base: HashMap<String, BaseActions>,
    features: Vec<FeatureDefinition>,
    feature_index: HashMap<String, usize>,
}

#[derive(Debug)]
struct BaseActions {
    global: Vec<String>,
    space: Vec<String>,
}

#[derive(Debug)]
struct FeatureDefinition {
    id: String,
    name: Option<String>,
    privileges: Vec<String>,
    actions: HashMap<String, Vec<String>>,
}

impl PrivilegeDefinition {
    /// Build a catalog from configuration, rejecting empty or duplicate ids
    pub fn new(config: &DefinitionsConfig) -> Result<Self, ConfigError> {
        let mut base_ids = Vec::with_capacity(config.base.len());
        let mut base = HashMap::with_capacity(config.base.len());

        for privilege in &config.base {
            require_id(&privilege.id, "definitions.base.id")?;
            if base.contains_key(&privilege.id) {
                return Err(ConfigError::Invalid {
                    message: format!("Duplicate base privilege: {}", privilege.id),
                });
            }
            base_ids.push(privilege.id.clone());
            base.insert(
                privilege.id.clone(),
                BaseActions {
                    global: dedup(&privilege.global),
                    space: dedup(&privilege.space),
                },
            );
        }

        let mut features = Vec::with_capacity(config.features.len());
        let mut feature_index = HashMap::with_capacity(config.features.len());

        for feature in &config.features {
            require_id(&feature.id, "definitions.features.id")?;
            if feature_index.contains_key(&feature.id) {
                return Err(ConfigError::Invalid {
                    message: format!("Duplicate feature: {}", feature.id),
                });
            }

            let mut privileges = Vec::with_capacity(feature.privileges.len());
            let mut actions = HashMap::with_capacity(feature.privileges.len());
            for privilege in &feature.privileges {
                require_id(
                    &privilege.id,
                    &format!("definitions.features.{}.privileges.id", feature.id),
                )?;
                if actions.contains_key(&privilege.id) {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "Duplicate privilege '{}' for feature '{}'",
                            privilege.id, feature.id
                        ),
                    });
                }
                privileges.push(privilege.id.clone());
                actions.insert(privilege.id.clone(), dedup(&privilege.actions));
            }

            feature_index.insert(feature.id.clone(), features.len());
            features.push(FeatureDefinition {
                id: feature.id.clone(),
                name: feature.name.clone(),
                privileges,
                actions,
            });
        }

        Ok(Self {
            base_ids,
            base,
            features,
            feature_index,
        })
    }

    /// Human-readable feature name, falling back to the id
    pub fn feature_name(&self, feature: &str) -> Option<&str> {
        self.feature(feature)
            .ok()
            .map(|f| f.name.as_deref().unwrap_or(&f.id))
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn feature(&self, feature: &str) -> Result<&FeatureDefinition, CatalogError> {
        self.feature_index
            .get(feature)
            .map(|&index| &self.features[index])
            .ok_or_else(|| CatalogError::unknown_feature(feature))
    }

    fn base(&self, privilege: &str) -> Result<&BaseActions, CatalogError> {
        self.base
            .get(privilege)
            .ok_or_else(|| CatalogError::unknown_base_privilege(privilege))
    }
}

impl PrivilegeCatalog for PrivilegeDefinition {
    fn base_privileges(&self) -> &[String] {
        &self.base_ids
    }

    fn global_base_actions(&self, privilege: &str) -> Result<&[String], CatalogError> {
        self.base(privilege).map(|b| b.global.as_slice())
    }

    fn space_base_actions(&self, privilege: &str) -> Result<&[String], CatalogError> {
        self.base(privilege).map(|b| b.space.as_slice())
    }

    fn feature_ids(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.id.as_str()).collect()
    }

    fn feature_privileges(&self, feature: &str) -> Result<&[String], CatalogError> {
        self.feature(feature).map(|f| f.privileges.as_slice())
    }

    fn feature_actions(&self, feature: &str, privilege: &str) -> Result<&[String], CatalogError> {
        self.feature(feature)?
            .actions
            .get(privilege)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::unknown_feature_privilege(feature, privilege))
    }
}

fn require_id(id: &str, field: &str) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::Missing {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Remove duplicate actions, keeping first occurrence order
fn dedup(actions: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(actions.len());
    actions
        .iter()
        .filter(|action| seen.insert(action.as_str()))
        .cloned()
        .collect()
}
