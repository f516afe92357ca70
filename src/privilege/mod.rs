//! Privilege resolution module
//!
//! Resolves the effective privilege a role holds for each feature within a
//! space (or globally), and explains where that privilege comes from.
//!
//! ## Privilege Model
//!
//! A feature privilege can be granted by four sources, ranked from most to
//! least authoritative:
//!
//! 1. **Global base** - A base privilege assigned at global scope
//! 2. **Global feature** - A feature privilege assigned at global scope
//! 3. **Space base** - A base privilege assigned within a space
//! 4. **Space feature** - A feature privilege assigned within a space
//!
//! Every privilege maps to a set of actions. The effective privilege is the
//! most permissive one whose actions are fully covered by at least one
//! source; ties go to the lower ranked source. When a broader grant wins over
//! a direct feature assignment, the explanation records the assignment it
//! superseded.
//!
//! Global assignments only ever consider the two global sources.
//!
//! ## Example Configuration
//!
//! ```toml
//! [[definitions.base]]
//! id = "read"
//! global = ["discover:show", "dashboards:show"]
//! space = ["discover:show", "dashboards:show"]
//!
//! [[definitions.features]]
//! id = "discover"
//! privileges = [
//!   { id = "all", actions = ["discover:show", "discover:save"] },
//!   { id = "read", actions = ["discover:show"] },
//! ]
//!
//! [[role.assignments]]
//! spaces = ["*"]
//! base = "read"
//!
//! [[role.assignments]]
//! spaces = ["marketing"]
//! features = { discover = "all" }
//! ```

pub mod calculator;
pub mod catalog;
pub mod coverage;
pub mod scenario;
pub mod types;

pub use calculator::PrivilegeCalculator;
pub use catalog::{PrivilegeCatalog, PrivilegeDefinition};
pub use coverage::are_actions_fully_covered;
pub use scenario::{PrivilegeScenario, rank_scenarios, source_rank};
pub use types::{
    AllowedPrivilegeSet, AllowedPrivileges, AssignmentSpec, EffectivePrivileges, GLOBAL_SPACE,
    NO_PRIVILEGE, PrivilegeExplanation, PrivilegeSource, Supersession,
};
