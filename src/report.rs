//! Report rendering
//!
//! Renders calculated privileges as plain text, JSON or TOML for the CLI.

use crate::privilege::{
    AllowedPrivilegeSet, AllowedPrivileges, EffectivePrivileges, PrivilegeExplanation,
};
use serde::Serialize;

/// Effective privileges of a role, one entry per assignment
#[derive(Debug, Serialize)]
pub struct EffectiveReport<'a> {
    pub role: &'a str,
    pub ignore_assigned: bool,
    pub assignments: Vec<EffectiveEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct EffectiveEntry<'a> {
    pub spaces: &'a [String],
    #[serde(flatten)]
    pub privileges: EffectivePrivileges,
}

/// Allowed privileges of a role, one entry per assignment
#[derive(Debug, Serialize)]
pub struct AllowedReport<'a> {
    pub role: &'a str,
    pub assignments: Vec<AllowedEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AllowedEntry<'a> {
    pub spaces: &'a [String],
    #[serde(flatten)]
    pub allowed: AllowedPrivilegeSet,
}

impl EffectiveReport<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("role: {}\n", self.role);
        if self.ignore_assigned {
            out.push_str("(ignoring direct assignments)\n");
        }

        for entry in &self.assignments {
            out.push_str(&format!("[{}]\n", entry.spaces.join(", ")));
            let width = name_width(entry.privileges.features.keys());
            out.push_str(&explanation_line("base", &entry.privileges.base, width));
            for (feature, explanation) in &entry.privileges.features {
                out.push_str(&explanation_line(feature, explanation, width));
            }
        }
        out
    }
}

impl AllowedReport<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("role: {}\n", self.role);

        for entry in &self.assignments {
            out.push_str(&format!("[{}]\n", entry.spaces.join(", ")));
            let width = name_width(entry.allowed.features.keys());
            out.push_str(&allowed_line("base", &entry.allowed.base, width));
            for (feature, allowed) in &entry.allowed.features {
                out.push_str(&allowed_line(feature, allowed, width));
            }
        }
        out
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a String>) -> usize {
    names.map(String::len).max().unwrap_or(0).max("base".len())
}

fn explanation_line(name: &str, explanation: &PrivilegeExplanation, width: usize) -> String {
    let origin = if explanation.is_directly_assigned {
        "assigned"
    } else {
        "inherited"
    };
    let mut line = format!(
        "  {:<width$}  {:<8} via {} ({})",
        name,
        explanation.privilege_label(),
        explanation.actual_privilege_source,
        origin,
        width = width
    );
    if let Some(superseded) = &explanation.superseded {
        line.push_str(&format!(
            ", supersedes {} ({})",
            superseded.privilege, superseded.source
        ));
    }
    line.push('\n');
    line
}

fn allowed_line(name: &str, allowed: &AllowedPrivileges, width: usize) -> String {
    let mut line = format!(
        "  {:<width$}  {}",
        name,
        allowed.privileges.join(", "),
        width = width
    );
    if allowed.can_unassign {
        line.push_str(" (may be unassigned)");
    }
    line.push('\n');
    line
}
