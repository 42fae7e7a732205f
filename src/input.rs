//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON envelope Claude Code sends to PreToolUse hooks. Only a
//! completely unparseable envelope is an error; missing or mistyped fields
//! read as empty.

use serde_json::{Map, Value};

use crate::error::InputError;

/// Main input structure from Claude Code hooks
#[derive(Debug, Clone)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Grep")
    pub tool_name: String,

    /// Tool-specific input parameters
    pub tool_input: ToolInput,

    /// Optional session identifier
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    pub hook_event_name: Option<String>,
}

/// The tool calls this hook governs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    /// Shell command execution
    Bash { command: String },

    /// In-place file edit
    Edit { file_path: String },

    /// Whole-file write
    Write { file_path: String },

    /// File read
    Read { file_path: String },

    /// Content search rooted at `path`
    Grep { path: String },

    /// Any other tool - passes through
    Unknown,
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ToolInput {
    /// Select the variant for `tool_name` and pull out its one field
    pub fn from_parts(tool_name: &str, tool_input: &Value) -> Self {
        let empty = Map::new();
        let fields = tool_input.as_object().unwrap_or(&empty);

        match tool_name {
            "Bash" => ToolInput::Bash {
                command: string_field(fields, "command"),
            },
            "Edit" => ToolInput::Edit {
                file_path: string_field(fields, "file_path"),
            },
            "Write" => ToolInput::Write {
                file_path: string_field(fields, "file_path"),
            },
            "Read" => ToolInput::Read {
                file_path: string_field(fields, "file_path"),
            },
            "Grep" => ToolInput::Grep {
                path: string_field(fields, "path"),
            },
            _ => ToolInput::Unknown,
        }
    }

    /// The command or path under inspection
    pub fn target(&self) -> &str {
        match self {
            ToolInput::Bash { command } => command,
            ToolInput::Edit { file_path }
            | ToolInput::Write { file_path }
            | ToolInput::Read { file_path } => file_path,
            ToolInput::Grep { path } => path,
            ToolInput::Unknown => "",
        }
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(json)?;
        let envelope = match value {
            Value::Object(envelope) => envelope,
            other => return Err(InputError::NotAnObject(json_kind(&other))),
        };

        let tool_name = string_field(&envelope, "tool_name");
        let tool_input = envelope.get("tool_input").unwrap_or(&Value::Null);
        let optional = |key: &str| envelope.get(key).and_then(Value::as_str).map(String::from);

        Ok(HookInput {
            tool_input: ToolInput::from_parts(&tool_name, tool_input),
            session_id: optional("session_id"),
            hook_event_name: optional("hook_event_name"),
            tool_name,
        })
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        let target = self.tool_input.target();
        if target.chars().count() > 100 {
            let head: String = target.chars().take(100).collect();
            format!("{}: {}...", self.tool_name, head)
        } else {
            format!("{}: {}", self.tool_name, target)
        }
    }
}
