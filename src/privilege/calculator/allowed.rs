//! Allowed privilege calculation
//!
//! Assigning a privilege lower than what a space already inherits has no
//! effect. Given the inherited explanation, this narrows the assignable
//! privileges to those that cover at least the inherited actions.

use crate::error::{CatalogError, ResolveResult};
use crate::privilege::catalog::PrivilegeCatalog;
use crate::privilege::coverage::are_actions_fully_covered;
use crate::privilege::types::{AllowedPrivileges, PrivilegeExplanation};

pub struct AllowedPrivilegesCalculator<'a> {
    catalog: &'a dyn PrivilegeCatalog,
}

impl<'a> AllowedPrivilegesCalculator<'a> {
    pub fn new(catalog: &'a dyn PrivilegeCatalog) -> Self {
        Self { catalog }
    }

    /// Base privileges assignable on top of `inherited`
    pub fn allowed_base_privileges(
        &self,
        inherited: &PrivilegeExplanation,
        is_global: bool,
    ) -> ResolveResult<AllowedPrivileges> {
        let catalog = self.catalog;
        allowed(catalog.base_privileges(), inherited, |privilege| {
            if is_global {
                catalog.global_base_actions(privilege)
            } else {
                catalog.space_base_actions(privilege)
            }
        })
    }

    /// Privileges of `feature` assignable on top of `inherited`
    pub fn allowed_feature_privileges(
        &self,
        feature: &str,
        inherited: &PrivilegeExplanation,
    ) -> ResolveResult<AllowedPrivileges> {
        let catalog = self.catalog;
        allowed(catalog.feature_privileges(feature)?, inherited, |privilege| {
            catalog.feature_actions(feature, privilege)
        })
    }
}

fn allowed<'c, F>(
    privileges: &'c [String],
    inherited: &PrivilegeExplanation,
    actions_of: F,
) -> ResolveResult<AllowedPrivileges>
where
    F: Fn(&str) -> Result<&'c [String], CatalogError>,
{
    let Some(inherited_privilege) = inherited.actual_privilege.as_deref() else {
        return Ok(AllowedPrivileges {
            privileges: privileges.to_vec(),
            can_unassign: true,
        });
    };

    let inherited_actions = actions_of(inherited_privilege)?;
    let mut allowed = Vec::with_capacity(privileges.len());
    for privilege in privileges {
        if are_actions_fully_covered(actions_of(privilege)?, inherited_actions) {
            allowed.push(privilege.clone());
        }
    }

    Ok(AllowedPrivileges {
        privileges: allowed,
        can_unassign: false,
    })
}
