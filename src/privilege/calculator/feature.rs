//! Feature privilege resolution
//!
//! A feature privilege can be granted by four overlapping sources. For each
//! feature privilege, most permissive first, the ranked scenarios are
//! checked in turn and the first scenario covering the privilege's actions
//! wins. A less authoritative source granting more is therefore still found
//! when no higher ranked source grants that much.

use crate::error::{ResolveError, ResolveResult};
use crate::privilege::catalog::PrivilegeCatalog;
use crate::privilege::coverage::are_actions_fully_covered;
use crate::privilege::scenario::{PrivilegeScenario, rank_scenarios};
use crate::privilege::types::{
    AssignmentSpec, PrivilegeExplanation, PrivilegeSource, Supersession,
};
use tracing::{debug, trace};

/// Resolves the most permissive privilege of a single feature
pub struct FeaturePrivilegeCalculator<'a> {
    catalog: &'a dyn PrivilegeCatalog,
    global: &'a AssignmentSpec,
    assigned_global_base_actions: &'a [String],
}

impl<'a> FeaturePrivilegeCalculator<'a> {
    pub fn new(
        catalog: &'a dyn PrivilegeCatalog,
        global: &'a AssignmentSpec,
        assigned_global_base_actions: &'a [String],
    ) -> Self {
        Self {
            catalog,
            global,
            assigned_global_base_actions,
        }
    }

    /// Find the most permissive privilege `spec` grants for `feature`
    ///
    /// `base_explanation` must be the base privilege already resolved for
    /// the same `spec`. With `ignore_assigned`, the feature's own assignment
    /// in `spec` is left out.
    pub fn most_permissive_feature_privilege(
        &self,
        spec: &AssignmentSpec,
        base_explanation: &PrivilegeExplanation,
        feature: &str,
        ignore_assigned: bool,
    ) -> ResolveResult<PrivilegeExplanation> {
        let scenarios = self.build_scenarios(spec, base_explanation, feature, ignore_assigned)?;

        for privilege in self.catalog.feature_privileges(feature)? {
            let required = self.catalog.feature_actions(feature, privilege)?;

            // First covering scenario wins
            if let Some(scenario) = scenarios
                .iter()
                .find(|scenario| are_actions_fully_covered(scenario.actions, required))
            {
                debug!(
                    feature,
                    privilege = %privilege,
                    source = %scenario.source,
                    direct = scenario.is_directly_assigned,
                    "Resolved feature privilege"
                );
                return Ok(scenario.explain(privilege));
            }
        }

        trace!(feature, "No feature privilege granted");
        Ok(PrivilegeExplanation::no_privilege(if spec.is_global() {
            PrivilegeSource::GlobalFeature
        } else {
            PrivilegeSource::SpaceFeature
        }))
    }

    /// Build the ranked scenarios that may grant `feature` within `spec`
    pub fn build_scenarios(
        &self,
        spec: &AssignmentSpec,
        base_explanation: &PrivilegeExplanation,
        feature: &str,
        ignore_assigned: bool,
    ) -> ResolveResult<Vec<PrivilegeScenario<'a>>> {
        let is_global = spec.is_global();
        let assigned = spec.assigned_feature_privilege(feature);
        let has_assigned = !ignore_assigned && assigned.is_some();

        let mut scenarios = Vec::with_capacity(4);

        scenarios.push(PrivilegeScenario {
            source: PrivilegeSource::GlobalBase,
            actions: self.base_actions(PrivilegeSource::GlobalBase, None)?,
            is_directly_assigned: false,
            superseded: Supersession::when(
                has_assigned,
                assigned,
                if is_global {
                    PrivilegeSource::GlobalFeature
                } else {
                    PrivilegeSource::SpaceFeature
                },
            ),
        });

        if !is_global || !ignore_assigned {
            let global_assigned = self.global.assigned_feature_privilege(feature);
            scenarios.push(PrivilegeScenario {
                source: PrivilegeSource::GlobalFeature,
                actions: self.feature_actions(feature, global_assigned)?,
                is_directly_assigned: is_global && has_assigned,
                superseded: Supersession::when(
                    has_assigned && !is_global,
                    assigned,
                    PrivilegeSource::SpaceFeature,
                ),
            });
        }

        if is_global {
            return Ok(rank_scenarios(scenarios));
        }

        if space_base_applies(base_explanation) {
            scenarios.push(PrivilegeScenario {
                source: PrivilegeSource::SpaceBase,
                actions: self.base_actions(
                    PrivilegeSource::SpaceBase,
                    attributed_space_base(base_explanation),
                )?,
                is_directly_assigned: false,
                superseded: Supersession::when(
                    has_assigned,
                    assigned,
                    PrivilegeSource::SpaceFeature,
                ),
            });
        }

        if !ignore_assigned {
            scenarios.push(PrivilegeScenario {
                source: PrivilegeSource::SpaceFeature,
                actions: self.feature_actions(feature, assigned)?,
                is_directly_assigned: true,
                superseded: None,
            });
        }

        Ok(rank_scenarios(scenarios))
    }

    fn base_actions(
        &self,
        source: PrivilegeSource,
        privilege: Option<&str>,
    ) -> ResolveResult<&'a [String]> {
        match (source, privilege) {
            (PrivilegeSource::GlobalBase, _) => Ok(self.assigned_global_base_actions),
            (PrivilegeSource::SpaceBase, Some(privilege)) => {
                Ok(self.catalog.space_base_actions(privilege)?)
            }
            (PrivilegeSource::SpaceBase, None) => Ok(&[]),
            (privilege_source, _) => Err(ResolveError::UnsupportedBaseSource { privilege_source }),
        }
    }

    fn feature_actions(&self, feature: &str, privilege: Option<&str>) -> ResolveResult<&'a [String]> {
        match privilege {
            Some(privilege) => Ok(self.catalog.feature_actions(feature, privilege)?),
            None => Ok(&[]),
        }
    }
}

/// Whether a space-level base grant applies to feature resolution
///
/// This holds when the space's base privilege resolved to the space base
/// source, or when a broader grant superseded a space base assignment.
fn space_base_applies(base_explanation: &PrivilegeExplanation) -> bool {
    base_explanation.actual_privilege_source == PrivilegeSource::SpaceBase
        || base_explanation.superseded_privilege_source() == Some(PrivilegeSource::SpaceBase)
}

/// The base privilege assigned within the space, as seen by base resolution
fn attributed_space_base(base_explanation: &PrivilegeExplanation) -> Option<&str> {
    base_explanation
        .superseded_privilege()
        .or(base_explanation.actual_privilege.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasePrivilegeConfig, DefinitionsConfig, FeatureConfig};
    use crate::privilege::catalog::PrivilegeDefinition;

    fn catalog() -> PrivilegeDefinition {
        PrivilegeDefinition::new(
            &DefinitionsConfig::default()
                .with_base(BasePrivilegeConfig::new(
                    "all",
                    ["delete", "edit", "read", "spaces:manage"],
                    ["delete", "edit", "read"],
                ))
                .with_base(BasePrivilegeConfig::new("read", ["read"], ["read"]))
                .with_feature(
                    FeatureConfig::new("C")
                        .privilege("all", ["delete", "edit", "read"])
                        .privilege("read", ["read"]),
                ),
        )
        .unwrap()
    }

    fn inherited(privilege: &str, source: PrivilegeSource) -> PrivilegeExplanation {
        PrivilegeExplanation {
            actual_privilege: Some(privilege.to_string()),
            actual_privilege_source: source,
            is_directly_assigned: false,
            superseded: None,
        }
    }

    fn sources(scenarios: &[PrivilegeScenario<'_>]) -> Vec<PrivilegeSource> {
        scenarios.iter().map(|s| s.source).collect()
    }

    #[test]
    fn test_global_scope_builds_only_global_scenarios() {
        let catalog = catalog();
        let global = AssignmentSpec::global().with_feature("C", "read");
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let base = PrivilegeExplanation::no_privilege(PrivilegeSource::GlobalBase);

        let scenarios = calculator.build_scenarios(&global, &base, "C", false).unwrap();
        assert_eq!(
            sources(&scenarios),
            vec![PrivilegeSource::GlobalBase, PrivilegeSource::GlobalFeature]
        );
        assert!(scenarios[1].is_directly_assigned);
        assert_eq!(scenarios[0].superseded.as_ref().map(|s| s.source), Some(PrivilegeSource::GlobalFeature));
        assert_eq!(scenarios[1].superseded, None);
    }

    #[test]
    fn test_global_scope_ignoring_assigned_drops_global_feature() {
        let catalog = catalog();
        let global = AssignmentSpec::global().with_feature("C", "read");
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let base = PrivilegeExplanation::no_privilege(PrivilegeSource::GlobalBase);

        let scenarios = calculator.build_scenarios(&global, &base, "C", true).unwrap();
        assert_eq!(sources(&scenarios), vec![PrivilegeSource::GlobalBase]);
        assert_eq!(scenarios[0].superseded, None);
    }

    #[test]
    fn test_space_scope_includes_space_base_when_base_resolved_there() {
        let catalog = catalog();
        let global = AssignmentSpec::global();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let spec = AssignmentSpec::for_spaces(["S"]).with_base("read").with_feature("C", "all");
        let base = inherited("read", PrivilegeSource::SpaceBase);

        let scenarios = calculator.build_scenarios(&spec, &base, "C", false).unwrap();
        assert_eq!(
            sources(&scenarios),
            vec![
                PrivilegeSource::GlobalBase,
                PrivilegeSource::GlobalFeature,
                PrivilegeSource::SpaceBase,
                PrivilegeSource::SpaceFeature,
            ]
        );
        assert_eq!(scenarios[2].actions, ["read"]);
        assert_eq!(scenarios[2].superseded.as_ref().map(|s| s.privilege.as_str()), Some("all"));
    }

    #[test]
    fn test_space_base_uses_superseded_base_privilege() {
        let catalog = catalog();
        let global = AssignmentSpec::global().with_base("all");
        let global_actions = catalog.global_base_actions("all").unwrap();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, global_actions);
        let spec = AssignmentSpec::for_spaces(["S"]).with_base("read");
        let base = PrivilegeExplanation {
            actual_privilege: Some("all".to_string()),
            actual_privilege_source: PrivilegeSource::GlobalBase,
            is_directly_assigned: false,
            superseded: Supersession::when(true, Some("read"), PrivilegeSource::SpaceBase),
        };

        let scenarios = calculator.build_scenarios(&spec, &base, "C", false).unwrap();
        let space_base = scenarios
            .iter()
            .find(|s| s.source == PrivilegeSource::SpaceBase)
            .unwrap();
        assert_eq!(space_base.actions, ["read"]);
    }

    #[test]
    fn test_space_base_omitted_when_base_inherited_globally() {
        let catalog = catalog();
        let global = AssignmentSpec::global().with_base("read");
        let calculator =
            FeaturePrivilegeCalculator::new(&catalog, &global, catalog.global_base_actions("read").unwrap());
        let spec = AssignmentSpec::for_spaces(["S"]);
        let base = inherited("read", PrivilegeSource::GlobalBase);

        let scenarios = calculator.build_scenarios(&spec, &base, "C", false).unwrap();
        assert!(!sources(&scenarios).contains(&PrivilegeSource::SpaceBase));
    }

    #[test]
    fn test_space_base_with_no_privilege_contributes_nothing() {
        let catalog = catalog();
        let global = AssignmentSpec::global();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let spec = AssignmentSpec::for_spaces(["S"]);
        let base = PrivilegeExplanation::no_privilege(PrivilegeSource::SpaceBase);

        let scenarios = calculator.build_scenarios(&spec, &base, "C", false).unwrap();
        let space_base = scenarios
            .iter()
            .find(|s| s.source == PrivilegeSource::SpaceBase)
            .unwrap();
        assert!(space_base.actions.is_empty());
    }

    #[test]
    fn test_ignore_assigned_drops_space_feature_and_supersession() {
        let catalog = catalog();
        let global = AssignmentSpec::global();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let spec = AssignmentSpec::for_spaces(["S"]).with_feature("C", "read");
        let base = PrivilegeExplanation::no_privilege(PrivilegeSource::SpaceBase);

        let scenarios = calculator.build_scenarios(&spec, &base, "C", true).unwrap();
        assert!(!sources(&scenarios).contains(&PrivilegeSource::SpaceFeature));
        assert!(scenarios.iter().all(|s| s.superseded.is_none()));
    }

    #[test]
    fn test_base_actions_rejects_feature_sources() {
        let catalog = catalog();
        let global = AssignmentSpec::global();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);

        for source in [PrivilegeSource::GlobalFeature, PrivilegeSource::SpaceFeature, PrivilegeSource::None] {
            assert_eq!(
                calculator.base_actions(source, Some("read")),
                Err(ResolveError::UnsupportedBaseSource {
                    privilege_source: source
                })
            );
        }
    }

    #[test]
    fn test_unknown_assigned_privilege_is_reported() {
        let catalog = catalog();
        let global = AssignmentSpec::global();
        let calculator = FeaturePrivilegeCalculator::new(&catalog, &global, &[]);
        let spec = AssignmentSpec::for_spaces(["S"]).with_feature("C", "minimal");
        let base = PrivilegeExplanation::no_privilege(PrivilegeSource::SpaceBase);

        let result = calculator.most_permissive_feature_privilege(&spec, &base, "C", false);
        assert!(matches!(result, Err(ResolveError::Catalog(_))));
    }
}
