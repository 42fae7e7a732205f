//! Glob detection and glob-to-regex translation
//!
//! Detection and translation disagree about `[`: a bracket
//! makes a pattern a glob, but the translator escapes it as a literal.

/// Characters escaped by the glob translator
const REGEX_META: &[char] = &['\\', '.', '^', '$', '+', '{', '}', '[', ']', '|', '(', ')'];

/// Fragment substituted for `*`
pub const STAR: &str = r"[^\s/]*";

/// Fragment substituted for `?`
pub const QUESTION: &str = r"[^\s/]";

/// Check if a pattern contains glob wildcards
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Convert a glob into a regex fragment for searching inside commands
///
/// Wildcards never cross whitespace or a path separator, so a glob only
/// ever matches within a single shell word and path segment.
pub fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(STAR),
            '?' => out.push_str(QUESTION),
            c if REGEX_META.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
