//! Decision engine for damage-control
//!
//! Routes each tool call to its checker. Tools outside the governed set
//! are allowed without inspection.

pub mod bash;
pub mod file;

use std::path::Path;

use crate::input::{HookInput, ToolInput};
use crate::output::Decision;
use crate::rules::loader;
use crate::rules::RuleSet;

pub use file::FileAccess;

/// The main decision engine
#[derive(Debug, Clone, Default)]
pub struct DamageControl {
    rules: RuleSet,
}

impl DamageControl {
    /// Create an engine over an already-loaded rule set
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Create an engine from an explicit pattern path or the standard locations
    pub fn load(patterns: Option<&Path>) -> Self {
        Self::new(loader::load_rules(patterns))
    }

    /// Main entry point: check an input and return a decision
    pub fn check(&self, input: &HookInput) -> Decision {
        match &input.tool_input {
            ToolInput::Bash { command } => self.check_command(command),
            ToolInput::Edit { file_path } => self.check_file(file_path, FileAccess::Edit),
            ToolInput::Write { file_path } => self.check_file(file_path, FileAccess::Write),
            ToolInput::Read { file_path } => self.check_file(file_path, FileAccess::Read),
            ToolInput::Grep { path } => self.check_file(path, FileAccess::Search),
            ToolInput::Unknown => Decision::Allow,
        }
    }

    /// Check a bash command
    pub fn check_command(&self, command: &str) -> Decision {
        bash::check_command(command, &self.rules)
    }

    /// Check a file operation
    pub fn check_file(&self, file_path: &str, access: FileAccess) -> Decision {
        file::check_path(file_path, access, &self.rules)
    }

    /// Get the loaded rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
