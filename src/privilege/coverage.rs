//! Action coverage checks

use std::collections::HashSet;

/// Check if every required action is present in the candidate actions
///
/// Order and duplicates are irrelevant. An empty required set is always
/// covered.
pub fn are_actions_fully_covered(candidate_actions: &[String], required_actions: &[String]) -> bool {
    let granted: HashSet<&str> = candidate_actions.iter().map(String::as_str).collect();
    required_actions
        .iter()
        .all(|action| granted.contains(action.as_str()))
}
