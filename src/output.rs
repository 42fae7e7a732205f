//! Decisions and how they are reported back to Claude Code
//!
//! Allow prints nothing. Ask prints a JSON permission payload on stdout.
//! Block prints a two-line message on stderr and exits with status 2.

use serde::Serialize;

/// Exit status for allow and ask
pub const EXIT_ALLOW: i32 = 0;

/// Exit status when the envelope cannot be read
pub const EXIT_INPUT_ERROR: i32 = 1;

/// Exit status reserved for blocks
pub const EXIT_BLOCK: i32 = 2;

/// Longest target shown in a block message
pub const MAX_TARGET_CHARS: usize = 100;

/// Hook event this binary answers
pub const HOOK_EVENT: &str = "PreToolUse";

/// Main output structure for an ask decision
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

/// Outcome of checking one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the call through silently
    Allow,

    /// Defer to the user
    Ask { reason: String },

    /// Refuse; `target` is the offending command or path
    Block { reason: String, target: String },
}

impl Decision {
    /// Create an ask decision
    pub fn ask(reason: impl Into<String>) -> Self {
        Decision::Ask {
            reason: reason.into(),
        }
    }

    /// Create a block decision
    pub fn block(reason: impl Into<String>, target: impl Into<String>) -> Self {
        Decision::Block {
            reason: reason.into(),
            target: target.into(),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Decision::Ask { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Get the reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Ask { reason } | Decision::Block { reason, .. } => Some(reason),
        }
    }

    /// Process exit status for this decision
    pub fn exit_code(&self) -> i32 {
        match self {
            Decision::Allow | Decision::Ask { .. } => EXIT_ALLOW,
            Decision::Block { .. } => EXIT_BLOCK,
        }
    }

    /// Text for stdout, if any
    pub fn stdout(&self) -> Option<String> {
        match self {
            Decision::Ask { reason } => Some(HookOutput::ask(reason).to_json()),
            _ => None,
        }
    }

    /// Text for stderr, if any
    pub fn stderr(&self) -> Option<String> {
        match self {
            Decision::Block { reason, target } => Some(block_message(reason, target)),
            _ => None,
        }
    }
}

impl HookOutput {
    /// Create an ask response with reason
    pub fn ask(reason: &str) -> Self {
        HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT.to_string(),
                permission_decision: "ask".to_string(),
                permission_decision_reason: reason.to_string(),
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Cap a command or path for display
pub fn truncate_target(target: &str) -> String {
    if target.chars().count() > MAX_TARGET_CHARS {
        let head: String = target.chars().take(MAX_TARGET_CHARS).collect();
        format!("{}...", head)
    } else {
        target.to_string()
    }
}

/// The two stderr lines explaining a block
pub fn block_message(reason: &str, target: &str) -> String {
    format!("SECURITY: {}\nTarget: {}", reason, truncate_target(target))
}
