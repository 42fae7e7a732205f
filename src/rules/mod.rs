//! Rule definitions for damage-control
//!
//! A `RuleSet` is the merged view of every pattern file: free-form command
//! rules plus three categories of protected paths.

pub mod loader;
pub mod operations;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};

/// Default reason for a command rule that does not give one
pub const DEFAULT_REASON: &str = "Blocked by pattern";

fn default_reason() -> String {
    DEFAULT_REASON.to_string()
}

/// Accept the YAML 1.1 boolean words (`yes`, `no`, `on`, `off`) that
/// serde_yaml reads as plain strings
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Word(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Word(word) => match word.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => Ok(true),
            "false" | "no" | "n" | "off" => Ok(false),
            _ => Err(de::Error::invalid_value(Unexpected::Str(&word), &"a boolean")),
        },
    }
}

/// A regex rule evaluated against Bash commands
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CommandRule {
    /// Regex searched case-insensitively in the command
    pub pattern: String,

    /// Human-readable reason shown on a match
    #[serde(default = "default_reason")]
    pub reason: String,

    /// Ask for confirmation instead of blocking
    #[serde(default, deserialize_with = "lenient_bool")]
    pub ask: bool,

    /// Skip command-position anchoring
    #[serde(default, deserialize_with = "lenient_bool")]
    pub match_anywhere: bool,
}

impl CommandRule {
    /// Create a blocking rule
    pub fn block(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
            ask: false,
            match_anywhere: false,
        }
    }

    /// Create a rule that asks for confirmation
    pub fn ask(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            ask: true,
            ..Self::block(pattern, reason)
        }
    }

    /// Let the rule match anywhere in the command
    pub fn anywhere(mut self) -> Self {
        self.match_anywhere = true;
        self
    }
}

/// Protection level of a path pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCategory {
    /// No operation of any kind
    ZeroAccess,

    /// Reads only
    ReadOnly,

    /// Anything but deletion
    NoDelete,
}

impl PathCategory {
    /// Configuration key holding this category
    pub fn key(&self) -> &'static str {
        match self {
            PathCategory::ZeroAccess => "zeroAccessPaths",
            PathCategory::ReadOnly => "readOnlyPaths",
            PathCategory::NoDelete => "noDeletePaths",
        }
    }

    /// Label used in block reasons
    pub fn label(&self) -> &'static str {
        match self {
            PathCategory::ZeroAccess => "zero-access path",
            PathCategory::ReadOnly => "read-only path",
            PathCategory::NoDelete => "no-delete path",
        }
    }
}

/// Merged rules, kept in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub command_rules: Vec<CommandRule>,
    pub zero_access: Vec<String>,
    pub read_only: Vec<String>,
    pub no_delete: Vec<String>,
}

impl RuleSet {
    /// Key holding the command rules
    pub const COMMAND_KEY: &'static str = "bashToolPatterns";

    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another rule set after this one
    pub fn extend(&mut self, other: RuleSet) {
        self.command_rules.extend(other.command_rules);
        self.zero_access.extend(other.zero_access);
        self.read_only.extend(other.read_only);
        self.no_delete.extend(other.no_delete);
    }

    /// Paths in one category
    pub fn paths(&self, category: PathCategory) -> &[String] {
        match category {
            PathCategory::ZeroAccess => &self.zero_access,
            PathCategory::ReadOnly => &self.read_only,
            PathCategory::NoDelete => &self.no_delete,
        }
    }

    pub(crate) fn paths_mut(&mut self, category: PathCategory) -> &mut Vec<String> {
        match category {
            PathCategory::ZeroAccess => &mut self.zero_access,
            PathCategory::ReadOnly => &mut self.read_only,
            PathCategory::NoDelete => &mut self.no_delete,
        }
    }

    /// Check if no rule of any kind is configured
    pub fn is_empty(&self) -> bool {
        self.command_rules.is_empty()
            && self.zero_access.is_empty()
            && self.read_only.is_empty()
            && self.no_delete.is_empty()
    }
}
