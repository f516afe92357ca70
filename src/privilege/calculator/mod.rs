//! Privilege calculators
//!
//! [`PrivilegeCalculator`] ties a role's assignments to a privilege catalog.
//! For every assignment it resolves the base privilege first and then feeds
//! that explanation into each feature's resolution.

pub mod allowed;
pub mod base;
pub mod feature;

pub use allowed::AllowedPrivilegesCalculator;
pub use base::BasePrivilegeCalculator;
pub use feature::FeaturePrivilegeCalculator;

use crate::error::ResolveResult;
use crate::privilege::catalog::PrivilegeCatalog;
use crate::privilege::types::{
    AllowedPrivilegeSet, AssignmentSpec, EffectivePrivileges, PrivilegeExplanation,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Calculates effective privileges for one role
pub struct PrivilegeCalculator<'a> {
    catalog: &'a dyn PrivilegeCatalog,
    assignments: &'a [AssignmentSpec],
    global: AssignmentSpec,
    assigned_global_base_actions: &'a [String],
}

impl<'a> PrivilegeCalculator<'a> {
    /// Create a calculator for a role's assignments
    ///
    /// A role without a global assignment is treated as having an empty one.
    pub fn new(
        catalog: &'a dyn PrivilegeCatalog,
        assignments: &'a [AssignmentSpec],
    ) -> ResolveResult<Self> {
        let global = assignments
            .iter()
            .find(|spec| spec.is_global())
            .cloned()
            .unwrap_or_else(AssignmentSpec::global);

        let assigned_global_base_actions = match global.assigned_base() {
            Some(privilege) => catalog.global_base_actions(privilege)?,
            None => &[],
        };

        Ok(Self {
            catalog,
            assignments,
            global,
            assigned_global_base_actions,
        })
    }

    /// The role's assignments, in role order
    pub fn assignments(&self) -> &'a [AssignmentSpec] {
        self.assignments
    }

    /// The role's global assignment
    pub fn global_assignment(&self) -> &AssignmentSpec {
        &self.global
    }

    /// The assignment covering `space`, or an empty one for that space
    pub fn assignment_for_space(&self, space: &str) -> AssignmentSpec {
        self.assignments
            .iter()
            .find(|spec| spec.covers_space(space))
            .cloned()
            .unwrap_or_else(|| AssignmentSpec::for_spaces([space]))
    }

    /// Resolve the base privilege of `spec`
    pub fn base_privilege(
        &self,
        spec: &AssignmentSpec,
        ignore_assigned: bool,
    ) -> ResolveResult<PrivilegeExplanation> {
        self.base_calculator()
            .most_permissive_base_privilege(spec, ignore_assigned)
    }

    /// Resolve a single feature privilege of `spec`
    pub fn feature_privilege(
        &self,
        spec: &AssignmentSpec,
        feature: &str,
        ignore_assigned: bool,
    ) -> ResolveResult<PrivilegeExplanation> {
        let base = self.base_privilege(spec, ignore_assigned)?;
        self.feature_calculator()
            .most_permissive_feature_privilege(spec, &base, feature, ignore_assigned)
    }

    /// Resolve the base privilege and every catalog feature of `spec`
    pub fn effective_privileges(
        &self,
        spec: &AssignmentSpec,
        ignore_assigned: bool,
    ) -> ResolveResult<EffectivePrivileges> {
        debug!(
            spaces = ?spec.spaces,
            ignore_assigned,
            "Calculating effective privileges"
        );

        let base = self.base_privilege(spec, ignore_assigned)?;
        let feature_calculator = self.feature_calculator();

        let mut features = BTreeMap::new();
        for feature in self.catalog.feature_ids() {
            let explanation = feature_calculator.most_permissive_feature_privilege(
                spec,
                &base,
                feature,
                ignore_assigned,
            )?;
            features.insert(feature.to_string(), explanation);
        }

        Ok(EffectivePrivileges { base, features })
    }

    /// Resolve effective privileges within a single space
    pub fn effective_privileges_for_space(
        &self,
        space: &str,
        ignore_assigned: bool,
    ) -> ResolveResult<EffectivePrivileges> {
        self.effective_privileges(&self.assignment_for_space(space), ignore_assigned)
    }

    /// Resolve effective privileges of every assignment, in role order
    pub fn calculate_all(&self, ignore_assigned: bool) -> ResolveResult<Vec<EffectivePrivileges>> {
        self.assignments
            .iter()
            .map(|spec| self.effective_privileges(spec, ignore_assigned))
            .collect()
    }

    /// Privileges that may still be assigned to `spec` given what it inherits
    pub fn allowed_privileges(&self, spec: &AssignmentSpec) -> ResolveResult<AllowedPrivilegeSet> {
        let inherited = self.effective_privileges(spec, true)?;
        let calculator = AllowedPrivilegesCalculator::new(self.catalog);

        let base = calculator.allowed_base_privileges(&inherited.base, spec.is_global())?;

        let mut features = BTreeMap::new();
        for (feature, explanation) in &inherited.features {
            features.insert(
                feature.clone(),
                calculator.allowed_feature_privileges(feature, explanation)?,
            );
        }

        Ok(AllowedPrivilegeSet { base, features })
    }

    fn base_calculator(&self) -> BasePrivilegeCalculator<'_> {
        BasePrivilegeCalculator::new(self.catalog, self.assigned_global_base_actions)
    }

    fn feature_calculator(&self) -> FeaturePrivilegeCalculator<'_> {
        FeaturePrivilegeCalculator::new(
            self.catalog,
            &self.global,
            self.assigned_global_base_actions,
        )
    }
}
