//! File tool checking
//!
//! Write and Edit respect zero-access and read-only paths. Read and Grep
//! respect zero-access only, since reading a read-only path is the point.

use crate::output::Decision;
use crate::pattern::path::match_path;
use crate::rules::{PathCategory, RuleSet};

/// How a file tool touches its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
    Edit,
    Search,
}

impl FileAccess {
    /// Verb phrase used in block reasons
    fn phrase(&self) -> &'static str {
        match self {
            FileAccess::Read => "read of",
            FileAccess::Write => "write to",
            FileAccess::Edit => "edit to",
            FileAccess::Search => "grep in",
        }
    }

    /// Categories enforced for this access, in precedence order
    pub fn categories(&self) -> &'static [PathCategory] {
        match self {
            FileAccess::Write | FileAccess::Edit => {
                &[PathCategory::ZeroAccess, PathCategory::ReadOnly]
            }
            FileAccess::Read | FileAccess::Search => &[PathCategory::ZeroAccess],
        }
    }
}

/// Check a file path for the given kind of access
pub fn check_path(file_path: &str, access: FileAccess, rules: &RuleSet) -> Decision {
    if file_path.is_empty() {
        return Decision::Allow;
    }

    for &category in access.categories() {
        let Some(pattern) = rules
            .paths(category)
            .iter()
            .find(|pattern| match_path(file_path, pattern))
        else {
            continue;
        };

        let reason = match category {
            PathCategory::ZeroAccess => format!(
                "Blocked {} zero-access path {} (no operations allowed)",
                access.phrase(),
                pattern
            ),
            _ => format!("Blocked {} {} {}", access.phrase(), category.label(), pattern),
        };
        return Decision::block(reason, file_path);
    }

    Decision::Allow
}
