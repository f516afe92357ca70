//! grantscope
//!
//! Resolves the effective privilege a role holds for each feature, globally
//! or within a space, when several independently assigned grants overlap,
//! and explains which grant produced it.
//!
//! ## Features
//!
//! - **Four ranked grant sources**: global base, global feature, space base, space feature
//! - **Explanations**: the winning source, direct vs. inherited, and any superseded assignment
//! - **What-if previews** that ignore direct assignments
//! - **Allowed privileges**: which privileges are still worth assigning on top of inherited ones
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Resolution Model
//!
//! ```text
//! for privilege in feature privileges (most permissive first):
//!     for scenario in ranked scenarios (global base → space feature):
//!         if scenario actions ⊇ privilege actions: return (privilege, scenario)
//! no privilege
//! ```
//!
//! ## Example
//!
//! ```
//! use grantscope::config::{BasePrivilegeConfig, DefinitionsConfig, FeatureConfig};
//! use grantscope::privilege::{
//!     AssignmentSpec, PrivilegeCalculator, PrivilegeDefinition, PrivilegeSource,
//! };
//!
//! let catalog = PrivilegeDefinition::new(
//!     &DefinitionsConfig::default()
//!         .with_base(BasePrivilegeConfig::new("read", ["read"], ["read"]))
//!         .with_feature(
//!             FeatureConfig::new("dashboards")
//!                 .privilege("all", ["delete", "edit", "read"])
//!                 .privilege("read", ["read"]),
//!         ),
//! )?;
//!
//! let assignments = vec![
//!     AssignmentSpec::global().with_base("read"),
//!     AssignmentSpec::for_spaces(["ops"]),
//! ];
//! let calculator = PrivilegeCalculator::new(&catalog, &assignments)?;
//!
//! let effective = calculator.effective_privileges_for_space("ops", false)?;
//! let dashboards = effective.feature("dashboards").unwrap();
//! assert_eq!(dashboards.actual_privilege.as_deref(), Some("read"));
//! assert_eq!(dashboards.actual_privilege_source, PrivilegeSource::GlobalBase);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod privilege;
pub mod report;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use privilege::{PrivilegeCalculator, PrivilegeDefinition};
