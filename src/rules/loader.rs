//! Pattern file discovery and loading
//!
//! Rules live in YAML, either one `patterns.yaml` or a `patterns/`
//! directory of fragments that are merged in sorted path order. Every
//! failure here degrades to fewer rules; nothing is fatal.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde_yaml::Value;

use super::{CommandRule, PathCategory, RuleSet};
use crate::error::ConfigError;

/// Hook directory relative to a project root
pub const PROJECT_HOOK_DIR: &str = ".claude/hooks/damage-control";

/// Name of a pattern fragment directory
pub const PATTERNS_DIR: &str = "patterns";

/// Name of a single pattern file
pub const PATTERNS_FILE: &str = "patterns.yaml";

/// Where rules are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// Directory of `*.yaml` / `*.yml` fragments
    Dir(PathBuf),

    /// A single YAML file
    File(PathBuf),
}

impl PatternSource {
    /// Classify an explicit path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            PatternSource::Dir(path)
        } else {
            PatternSource::File(path)
        }
    }

    /// Search the standard locations
    ///
    /// Directories win over single files. When nothing exists the error
    /// carries the path that was expected, for the warning.
    pub fn locate(project_dir: Option<&Path>, exe_dir: Option<&Path>) -> Result<Self, PathBuf> {
        let mut roots: Vec<PathBuf> = Vec::new();
        if let Some(project) = project_dir {
            roots.push(project.join(PROJECT_HOOK_DIR));
        }
        if let Some(exe) = exe_dir {
            roots.push(exe.to_path_buf());
            if let Some(skill_root) = exe.parent().and_then(Path::parent) {
                roots.push(skill_root.to_path_buf());
            }
        }

        if let Some(dir) = roots.iter().map(|r| r.join(PATTERNS_DIR)).find(|d| d.is_dir()) {
            return Ok(PatternSource::Dir(dir));
        }
        if let Some(file) = roots.iter().map(|r| r.join(PATTERNS_FILE)).find(|f| f.exists()) {
            return Ok(PatternSource::File(file));
        }

        let fallback = exe_dir
            .map(|e| e.join(PATTERNS_FILE))
            .unwrap_or_else(|| PathBuf::from(PATTERNS_FILE));
        Err(fallback)
    }

    /// Load every rule from this source
    pub fn load(&self) -> RuleSet {
        match self {
            PatternSource::Dir(dir) => load_dir(dir),
            PatternSource::File(file) => load_file(file).unwrap_or_else(|e| {
                eprintln!("Warning: {}", e);
                RuleSet::new()
            }),
        }
    }
}

/// Load rules from an explicit path, or from the standard locations
pub fn load_rules(explicit: Option<&Path>) -> RuleSet {
    if let Some(path) = explicit {
        if !path.exists() {
            eprintln!("Warning: Config not found at {}", path.display());
            return RuleSet::new();
        }
        return PatternSource::from_path(path).load();
    }

    let project_dir = env::var_os("CLAUDE_PROJECT_DIR").map(PathBuf::from);
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    match PatternSource::locate(project_dir.as_deref(), exe_dir.as_deref()) {
        Ok(source) => source.load(),
        Err(expected) => {
            eprintln!("Warning: Config not found at {}", expected.display());
            RuleSet::new()
        }
    }
}

/// Pattern files under a directory, `.yaml` before `.yml`, each sorted
pub fn pattern_files(dir: &Path) -> Vec<PathBuf> {
    let root = Pattern::escape(&dir.to_string_lossy());
    let mut files: Vec<PathBuf> = Vec::new();

    for ext in ["yaml", "yml"] {
        let Ok(paths) = glob::glob(&format!("{}/**/*.{}", root, ext)) else {
            continue;
        };
        let mut found: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
        found.sort();
        for path in found {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    files
}

/// Load and merge every pattern file in a directory
pub fn load_dir(dir: &Path) -> RuleSet {
    let mut merged = RuleSet::new();
    for file in pattern_files(dir) {
        match load_file(&file) {
            Ok(rules) => merged.extend(rules),
            Err(e) => eprintln!("Warning: {}", e),
        }
    }
    merged
}

/// Load a single pattern file
pub fn load_file(path: &Path) -> Result<RuleSet, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// Parse one YAML fragment
///
/// Unknown keys, keys whose value is not a list, and list entries of the
/// wrong shape are dropped.
pub fn parse_rules(content: &str) -> Result<RuleSet, serde_yaml::Error> {
    let mut rules = RuleSet::new();
    if is_blank_document(content) {
        return Ok(rules);
    }

    let value: Value = serde_yaml::from_str(content)?;
    let Value::Mapping(map) = value else {
        return Ok(rules);
    };

    if let Some(Value::Sequence(items)) = map.get(RuleSet::COMMAND_KEY) {
        for item in items {
            match serde_yaml::from_value::<CommandRule>(item.clone()) {
                Ok(rule) if !rule.pattern.is_empty() => rules.command_rules.push(rule),
                Ok(_) => eprintln!("Warning: skipping command rule without a pattern"),
                Err(e) => eprintln!("Warning: skipping malformed command rule: {}", e),
            }
        }
    }

    for category in [PathCategory::ZeroAccess, PathCategory::ReadOnly, PathCategory::NoDelete] {
        if let Some(Value::Sequence(items)) = map.get(category.key()) {
            let paths = rules.paths_mut(category);
            paths.extend(items.iter().filter_map(Value::as_str).map(String::from));
        }
    }

    Ok(rules)
}
