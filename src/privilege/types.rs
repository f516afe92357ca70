//! Privilege types
//!
//! Core types shared by the privilege calculators.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Space identifier that marks an assignment as global
pub const GLOBAL_SPACE: &str = "*";

/// Display value for "no privilege"
pub const NO_PRIVILEGE: &str = "none";

/// Where a privilege assignment originates
///
/// Ranking between sources is defined by
/// [`source_rank`](crate::privilege::scenario::source_rank), not by the
/// declaration order of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivilegeSource {
    /// No applicable source
    None,
    /// Base privilege assigned at global scope
    GlobalBase,
    /// Feature privilege assigned at global scope
    GlobalFeature,
    /// Base privilege assigned within a space
    SpaceBase,
    /// Feature privilege assigned within a space
    SpaceFeature,
}

impl PrivilegeSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PrivilegeSource::None => "NONE",
            PrivilegeSource::GlobalBase => "GLOBAL_BASE",
            PrivilegeSource::GlobalFeature => "GLOBAL_FEATURE",
            PrivilegeSource::SpaceBase => "SPACE_BASE",
            PrivilegeSource::SpaceFeature => "SPACE_FEATURE",
        }
    }

    /// Check if this source carries a base (non-feature) privilege
    pub const fn is_base(&self) -> bool {
        matches!(self, PrivilegeSource::GlobalBase | PrivilegeSource::SpaceBase)
    }

    /// Check if this source was assigned at global scope
    pub const fn is_global(&self) -> bool {
        matches!(
            self,
            PrivilegeSource::GlobalBase | PrivilegeSource::GlobalFeature
        )
    }
}

impl fmt::Display for PrivilegeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The privileges a role assigns within a set of spaces (or globally)
///
/// At most one privilege is assigned per feature, and at most one base
/// privilege. Absence is `None` / a missing map entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentSpec {
    /// Spaces this assignment applies to; `["*"]` for the global assignment
    pub spaces: Vec<String>,

    /// Assigned base privilege
    pub base: Option<String>,

    /// Assigned privilege per feature
    pub features: BTreeMap<String, String>,
}

impl AssignmentSpec {
    /// An empty global assignment
    pub fn global() -> Self {
        Self {
            spaces: vec![GLOBAL_SPACE.to_string()],
            ..Default::default()
        }
    }

    /// An empty assignment for the given spaces
    pub fn for_spaces<I, S>(spaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            spaces: spaces.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_base(mut self, privilege: impl Into<String>) -> Self {
        self.base = Some(privilege.into());
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>, privilege: impl Into<String>) -> Self {
        self.features.insert(feature.into(), privilege.into());
        self
    }

    /// Check if this is the global assignment
    pub fn is_global(&self) -> bool {
        self.spaces.iter().any(|space| space == GLOBAL_SPACE)
    }

    /// Check if this assignment applies to the given space
    pub fn covers_space(&self, space: &str) -> bool {
        self.spaces.iter().any(|s| s == space)
    }

    pub fn assigned_base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn assigned_feature_privilege(&self, feature: &str) -> Option<&str> {
        self.features.get(feature).map(String::as_str)
    }
}

/// A direct assignment that was overridden by a broader grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supersession {
    pub privilege: String,
    pub source: PrivilegeSource,
}

impl Supersession {
    /// Record supersession of `privilege` only when `is_superseding` holds
    pub fn when(
        is_superseding: bool,
        privilege: Option<&str>,
        source: PrivilegeSource,
    ) -> Option<Self> {
        if !is_superseding {
            return None;
        }
        privilege.map(|privilege| Self {
            privilege: privilege.to_string(),
            source,
        })
    }
}

/// Why a feature or base privilege resolved the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivilegeExplanation {
    /// The effective privilege; `None` when nothing is granted
    #[serde(serialize_with = "serialize_privilege")]
    pub actual_privilege: Option<String>,
    pub actual_privilege_source: PrivilegeSource,
    pub is_directly_assigned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded: Option<Supersession>,
}

impl PrivilegeExplanation {
    /// The terminal result when no source grants any privilege
    pub fn no_privilege(source: PrivilegeSource) -> Self {
        Self {
            actual_privilege: None,
            actual_privilege_source: source,
            is_directly_assigned: true,
            superseded: None,
        }
    }

    pub fn has_privilege(&self) -> bool {
        self.actual_privilege.is_some()
    }

    /// The effective privilege, or [`NO_PRIVILEGE`]
    pub fn privilege_label(&self) -> &str {
        self.actual_privilege.as_deref().unwrap_or(NO_PRIVILEGE)
    }

    pub fn superseded_privilege(&self) -> Option<&str> {
        self.superseded.as_ref().map(|s| s.privilege.as_str())
    }

    pub fn superseded_privilege_source(&self) -> Option<PrivilegeSource> {
        self.superseded.as_ref().map(|s| s.source)
    }
}

/// Serialize a missing privilege as [`NO_PRIVILEGE`]
fn serialize_privilege<S>(privilege: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(privilege.as_deref().unwrap_or(NO_PRIVILEGE))
}

/// Effective base and feature privileges for one assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectivePrivileges {
    pub base: PrivilegeExplanation,
    pub features: BTreeMap<String, PrivilegeExplanation>,
}

impl EffectivePrivileges {
    pub fn feature(&self, feature: &str) -> Option<&PrivilegeExplanation> {
        self.features.get(feature)
    }
}

/// Privileges that may still be assigned on top of what is inherited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowedPrivileges {
    /// Assignable privileges, most permissive first
    pub privileges: Vec<String>,
    /// Whether the assignment can be removed entirely
    pub can_unassign: bool,
}

impl AllowedPrivileges {
    pub fn allows(&self, privilege: &str) -> bool {
        self.privileges.iter().any(|p| p == privilege)
    }
}

/// Allowed base and feature privileges for one assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowedPrivilegeSet {
    pub base: AllowedPrivileges,
    pub features: BTreeMap<String, AllowedPrivileges>,
}
