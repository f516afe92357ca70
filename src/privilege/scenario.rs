//! Privilege scenarios
//!
//! A scenario is one candidate explanation of effective access: the actions
//! a single source grants, and which direct assignment (if any) it would
//! override if chosen.

use crate::privilege::types::{PrivilegeExplanation, PrivilegeSource, Supersession};

/// A candidate grant from one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeScenario<'a> {
    pub source: PrivilegeSource,
    pub actions: &'a [String],
    pub is_directly_assigned: bool,
    pub superseded: Option<Supersession>,
}

impl<'a> PrivilegeScenario<'a> {
    /// Build the explanation for `privilege` being granted by this scenario
    pub fn explain(&self, privilege: &str) -> PrivilegeExplanation {
        PrivilegeExplanation {
            actual_privilege: Some(privilege.to_string()),
            actual_privilege_source: self.source,
            is_directly_assigned: self.is_directly_assigned,
            superseded: if self.is_directly_assigned {
                None
            } else {
                self.superseded.clone()
            },
        }
    }
}

/// Evaluation rank of a source; lower ranks are evaluated first and win ties
pub fn source_rank(source: PrivilegeSource) -> u8 {
    match source {
        PrivilegeSource::GlobalBase => 1,
        PrivilegeSource::GlobalFeature => 2,
        PrivilegeSource::SpaceBase => 3,
        PrivilegeSource::SpaceFeature => 4,
        // never attached to a scenario
        PrivilegeSource::None => u8::MAX,
    }
}

/// Stable-sort scenarios by source rank
pub fn rank_scenarios(mut scenarios: Vec<PrivilegeScenario<'_>>) -> Vec<PrivilegeScenario<'_>> {
    scenarios.sort_by_key(|scenario| source_rank(scenario.source));
    scenarios
}
