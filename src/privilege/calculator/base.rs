//! Base privilege resolution

use crate::error::ResolveResult;
use crate::privilege::catalog::PrivilegeCatalog;
use crate::privilege::coverage::are_actions_fully_covered;
use crate::privilege::scenario::{PrivilegeScenario, rank_scenarios};
use crate::privilege::types::{
    AssignmentSpec, PrivilegeExplanation, PrivilegeSource, Supersession,
};
use tracing::{debug, trace};

/// Resolves the most permissive base privilege of an assignment
pub struct BasePrivilegeCalculator<'a> {
    catalog: &'a dyn PrivilegeCatalog,
    assigned_global_base_actions: &'a [String],
}

impl<'a> BasePrivilegeCalculator<'a> {
    pub fn new(
        catalog: &'a dyn PrivilegeCatalog,
        assigned_global_base_actions: &'a [String],
    ) -> Self {
        Self {
            catalog,
            assigned_global_base_actions,
        }
    }

    /// Find the most permissive base privilege granted to `spec`
    ///
    /// With `ignore_assigned`, the space's own base assignment is left out,
    /// yielding only what the space inherits. The global assignment inherits
    /// nothing, so it resolves to no privilege.
    pub fn most_permissive_base_privilege(
        &self,
        spec: &AssignmentSpec,
        ignore_assigned: bool,
    ) -> ResolveResult<PrivilegeExplanation> {
        let is_global = spec.is_global();
        if is_global && ignore_assigned {
            trace!("Global base is directly assigned, nothing inherited");
            return Ok(PrivilegeExplanation::no_privilege(PrivilegeSource::GlobalBase));
        }

        let scenarios = self.build_scenarios(spec, ignore_assigned)?;

        // Base privileges are ranked most permissive first
        for privilege in self.catalog.base_privileges() {
            let required = if is_global {
                self.catalog.global_base_actions(privilege)?
            } else {
                self.catalog.space_base_actions(privilege)?
            };

            if let Some(scenario) = scenarios
                .iter()
                .find(|scenario| are_actions_fully_covered(scenario.actions, required))
            {
                debug!(
                    privilege = %privilege,
                    source = %scenario.source,
                    "Resolved base privilege"
                );
                return Ok(scenario.explain(privilege));
            }
        }

        trace!(global = is_global, "No base privilege granted");
        Ok(PrivilegeExplanation::no_privilege(if is_global {
            PrivilegeSource::GlobalBase
        } else {
            PrivilegeSource::SpaceBase
        }))
    }

    fn build_scenarios(
        &self,
        spec: &AssignmentSpec,
        ignore_assigned: bool,
    ) -> ResolveResult<Vec<PrivilegeScenario<'a>>> {
        let is_global = spec.is_global();
        let assigned = spec.assigned_base();

        let mut scenarios = vec![PrivilegeScenario {
            source: PrivilegeSource::GlobalBase,
            actions: self.assigned_global_base_actions,
            is_directly_assigned: is_global,
            superseded: Supersession::when(
                !ignore_assigned && !is_global,
                assigned,
                PrivilegeSource::SpaceBase,
            ),
        }];

        if is_global {
            return Ok(scenarios);
        }

        if !ignore_assigned {
            let actions = match assigned {
                Some(privilege) => self.catalog.space_base_actions(privilege)?,
                None => &[],
            };
            scenarios.push(PrivilegeScenario {
                source: PrivilegeSource::SpaceBase,
                actions,
                is_directly_assigned: true,
                superseded: None,
            });
        }

        Ok(rank_scenarios(scenarios))
    }
}
