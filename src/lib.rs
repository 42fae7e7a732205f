//! damage-control - Pre-execution guard for Claude Code tool calls
//!
//! Decides whether a Bash command or file operation may run, based on
//! rules loaded from YAML pattern files.
//!
//! # Features
//!
//! - **Command rules**: regexes that block or ask, anchored to command
//!   position so quoted text does not trigger them
//! - **Zero-access paths**: never read, written, searched or mentioned
//! - **Read-only paths**: readable, but every mutating shell idiom is blocked
//! - **No-delete paths**: anything but deletion
//! - **Audit logging**: optional JSONL log of all decisions
//!
//! # Example
//!
//! ```
//! use damage_control::{CommandRule, DamageControl, HookInput, RuleSet};
//!
//! let rules = RuleSet {
//!     command_rules: vec![CommandRule::block(r"rm\s+-rf\s+/(\s|$)", "rm at root")],
//!     read_only: vec!["/etc/".to_string()],
//!     ..RuleSet::default()
//! };
//! let engine = DamageControl::new(rules);
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//!
//! let decision = engine.check(&hook_input);
//! assert!(decision.is_block());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod pattern;
pub mod rules;

// Re-exports for convenience
pub use config::Settings;
pub use engine::{DamageControl, FileAccess};
pub use input::{HookInput, ToolInput};
pub use output::{Decision, HookOutput};
pub use rules::{CommandRule, PathCategory, RuleSet};
