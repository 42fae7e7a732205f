//! Matching rules and operation templates against shell command strings
//!
//! Nothing here parses shell. Rules are regexes searched over the raw
//! command text, with an optional anchor that pins them to a command
//! position.

use fancy_regex::{escape, Regex};

use super::glob::{glob_to_regex, is_glob};
use super::path::expand_home;
use crate::error::PatternError;
use crate::rules::operations::OperationTemplate;

/// Start of the command, or just after `;`, `|`, `&` or `(`
///
/// `&&`, `||` and `$(` all end in a character from the set, so they are
/// covered too. Only position is constrained; word boundaries are up to
/// the pattern that follows.
pub const CMD_POSITION_PREFIX: &str = r"(?:^|[;|&(]\s*)";

/// Placeholder for the path inside an operation template
pub const PATH_SLOT: &str = "{path}";

/// Constrain a rule pattern to command position
pub fn anchored(pattern: &str) -> String {
    format!("{}{}", CMD_POSITION_PREFIX, pattern)
}

/// Search for `pattern` anywhere in `haystack`
pub fn search(pattern: &str, haystack: &str, case_insensitive: bool) -> Result<bool, PatternError> {
    let source = if case_insensitive {
        format!("(?i){}", pattern)
    } else {
        pattern.to_string()
    };

    let re = Regex::new(&source).map_err(|e| PatternError::new(pattern, e))?;
    re.is_match(haystack).map_err(|e| PatternError::new(pattern, e))
}

/// Check whether a command performs any of `templates` on `path_pattern`
///
/// Returns the block reason of the first template that fires. Templates
/// that fail to compile are skipped.
pub fn check_path_operation(
    command: &str,
    path_pattern: &str,
    templates: &[OperationTemplate],
    category: &str,
) -> Option<String> {
    let reason = |t: &OperationTemplate| {
        format!("Blocked: {} operation on {} {}", t.operation, category, path_pattern)
    };

    if is_glob(path_pattern) {
        let glob_regex = glob_to_regex(path_pattern);
        for template in templates {
            let prefix = template.pattern.replace(PATH_SLOT, "");
            if prefix.is_empty() {
                continue;
            }
            if let Ok(true) = search(&format!("{}{}", prefix, glob_regex), command, true) {
                return Some(reason(template));
            }
        }
        return None;
    }

    let expanded = expand_home(path_pattern);
    let variants = [escape(&expanded), escape(path_pattern)];

    for template in templates {
        let hit = variants.iter().any(|variant| {
            let pattern = template.pattern.replace(PATH_SLOT, variant);
            matches!(search(&pattern, command, true), Ok(true))
        });
        if hit {
            return Some(reason(template));
        }
    }

    None
}

/// Check whether a command mentions a zero-access path at all
///
/// Globs are searched case-insensitively as translated fragments. Literal
/// paths must appear verbatim, either as written or with `~` expanded.
pub fn mentions_path(command: &str, path_pattern: &str) -> Result<bool, PatternError> {
    if is_glob(path_pattern) {
        return search(&glob_to_regex(path_pattern), command, true);
    }

    Ok(command.contains(&expand_home(path_pattern)) || command.contains(path_pattern))
}
