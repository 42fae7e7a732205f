//! JSONL audit logging for damage-control
//!
//! Records each decision to a JSONL file for later analysis. Off unless
//! enabled in the settings file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::input::HookInput;
use crate::output::Decision;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Asked,
    Blocked,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub level: LogLevel,

    /// Tool that was invoked
    pub tool: String,

    /// Summary of the input
    pub input_summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry from input and decision
    pub fn new(input: &HookInput, decision: &Decision) -> Self {
        let level = match decision {
            Decision::Allow => LogLevel::Allowed,
            Decision::Ask { .. } => LogLevel::Asked,
            Decision::Block { .. } => LogLevel::Blocked,
        };

        Self {
            timestamp: Utc::now(),
            level,
            tool: input.tool_name.clone(),
            input_summary: input.summary(),
            reason: decision.reason().map(String::from),
            session_id: input.session_id.clone(),
        }
    }
}

/// Open `path` for appending, creating missing parent directories
fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    ///
    /// A path that cannot be opened is reported on stderr; the hook itself
    /// still runs.
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| match open_log(p) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Warning: audit log {} disabled: {}", p.display(), e);
                None
            }
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_decision(&mut self, input: &HookInput, decision: &Decision) -> io::Result<()> {
        self.log(&AuditEntry::new(input, decision))
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
