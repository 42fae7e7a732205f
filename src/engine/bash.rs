//! Bash command checking
//!
//! Four passes over the raw command string, in a fixed order: configured
//! regex rules, zero-access mentions, read-only operations, no-delete
//! operations. The first pass to produce a decision ends the check.

use crate::error::PatternError;
use crate::output::Decision;
use crate::pattern::command::{anchored, check_path_operation, mentions_path, search};
use crate::pattern::glob::is_glob;
use crate::rules::operations::{NO_DELETE_BLOCKED, READ_ONLY_BLOCKED};
use crate::rules::{CommandRule, PathCategory, RuleSet};

/// Check a Bash command against every rule category
pub fn check_command(command: &str, rules: &RuleSet) -> Decision {
    if command.is_empty() {
        return Decision::Allow;
    }

    if let Some(decision) = check_command_rules(command, &rules.command_rules) {
        return decision;
    }

    if let Some(decision) = check_zero_access(command, &rules.zero_access) {
        return decision;
    }

    for (category, templates) in [
        (PathCategory::ReadOnly, READ_ONLY_BLOCKED.as_slice()),
        (PathCategory::NoDelete, NO_DELETE_BLOCKED),
    ] {
        for path in rules.paths(category) {
            if let Some(reason) = check_path_operation(command, path, templates, category.label()) {
                return Decision::block(reason, command);
            }
        }
    }

    Decision::Allow
}

/// Does a single rule match the command
fn rule_matches(command: &str, rule: &CommandRule) -> Result<bool, PatternError> {
    if rule.match_anywhere {
        search(&rule.pattern, command, true)
    } else {
        search(&anchored(&rule.pattern), command, true)
    }
}

/// First matching rule decides, ask or block alike
///
/// Rules that fail to compile are skipped so one bad entry cannot disable
/// the rest.
fn check_command_rules(command: &str, rules: &[CommandRule]) -> Option<Decision> {
    let rule = rules
        .iter()
        .find(|rule| matches!(rule_matches(command, rule), Ok(true)))?;

    if rule.ask {
        Some(Decision::ask(&rule.reason))
    } else {
        Some(Decision::block(format!("Blocked: {}", rule.reason), command))
    }
}

/// Any mention of a zero-access path blocks, whatever the operation
fn check_zero_access(command: &str, paths: &[String]) -> Option<Decision> {
    let path = paths
        .iter()
        .find(|path| matches!(mentions_path(command, path), Ok(true)))?;

    let kind = if is_glob(path) { "pattern" } else { "path" };
    Some(Decision::block(
        format!("Blocked: zero-access {} {} (no operations allowed)", kind, path),
        command,
    ))
}
