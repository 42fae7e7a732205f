//! Filesystem path matching against user-supplied patterns
//!
//! Everything here is lexical: paths are never resolved against the disk,
//! so symlinks and missing files behave the same as real ones.

use glob::{MatchOptions, Pattern};
use once_cell::sync::Lazy;
use std::path::Path;

use super::glob::is_glob;

static HOME: Lazy<Option<String>> =
    Lazy::new(|| dirs::home_dir().map(|p| p.to_string_lossy().into_owned()));

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// The invoking user's home directory, if one is known
pub fn home_dir() -> Option<&'static str> {
    HOME.as_deref()
}

/// Home directory of `user`, assumed to sit next to ours
fn user_home(home: &str, user: &str) -> String {
    let home = Path::new(home);
    if home.file_name().is_some_and(|name| name == user) {
        return home.to_string_lossy().into_owned();
    }
    home.parent()
        .unwrap_or(home)
        .join(user)
        .to_string_lossy()
        .into_owned()
}

/// Replace a leading `~` or `~user` with a home directory
fn expand_tilde(path: &str) -> String {
    let (Some(home), Some(rest)) = (home_dir(), path.strip_prefix('~')) else {
        return path.to_string();
    };

    let (user, tail) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
    if user.is_empty() {
        format!("{}{}", home, tail)
    } else {
        format!("{}{}", user_home(home, user), tail)
    }
}

fn join(absolute: bool, segments: &[&str]) -> String {
    let body = segments.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

/// Collapse repeated separators, `.` segments and a trailing separator
fn tidy(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    join(path.starts_with('/'), &segments)
}

/// Expand `~` and tidy the result the way a path object would print it
///
/// `~/.ssh/` becomes `<home>/.ssh`. `~user/.ssh` becomes `.ssh` under a
/// sibling of the home directory named `user`, or the home directory
/// itself when it already carries that name.
pub fn expand_home(path: &str) -> String {
    tidy(&expand_tilde(path))
}

/// Lexically normalize a path, folding `..` segments
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `/..` is `/`
                None if absolute => {}
                _ => segments.push(segment),
            },
            _ => segments.push(segment),
        }
    }
    join(absolute, &segments)
}

/// The final path segment, empty for `/` and `.`
fn basename(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(".") | None => "",
        Some(name) => name,
    }
}

/// Index of the `]` closing a character class opened at `start`
///
/// A `]` directly after `[` or `[!` is a member, not the close.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut first = start + 1;
    if chars.get(first) == Some(&'!') {
        first += 1;
    }
    let from = first + 1;
    chars
        .get(from..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| from + offset)
}

/// Rewrite fnmatch syntax the glob crate rejects
///
/// Runs of `*` collapse to one `*` (which already crosses `/` under
/// [`GLOB_OPTIONS`]), and a `[` that never closes becomes a literal.
fn fnmatch_compatible(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push_str("[[]"),
            },
            c => out.push(c),
        }
        i += 1;
    }

    out
}

/// Shell-glob comparison of a whole string
fn glob_matches(text: &str, pattern: &str) -> bool {
    Pattern::new(&fnmatch_compatible(pattern))
        .map(|p| p.matches_with(text, GLOB_OPTIONS))
        .unwrap_or(false)
}

/// Check whether a file path matches a glob or prefix pattern
///
/// Globs compare case-insensitively against the basename first and fall
/// back to the whole expanded path, which lets `**/secrets/*` match nested
/// files. Other patterns are case-sensitive prefixes of the expanded path.
pub fn match_path(actual: &str, pattern: &str) -> bool {
    let expanded_pattern = expand_home(pattern);
    let expanded_actual = expand_home(&normalize(actual));

    if is_glob(pattern) {
        let name = basename(&expanded_actual).to_lowercase();
        let expanded_pattern = expanded_pattern.to_lowercase();

        return glob_matches(&name, &expanded_pattern)
            || glob_matches(&name, &pattern.to_lowercase())
            || glob_matches(&expanded_actual.to_lowercase(), &expanded_pattern);
    }

    expanded_actual.starts_with(&expanded_pattern)
        || expanded_actual == expanded_pattern.trim_end_matches('/')
}
