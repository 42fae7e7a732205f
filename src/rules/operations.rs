//! Shell idioms that mutate a path
//!
//! Each template is a regex with a `{path}` slot. The engine fills the slot
//! with a protected path and searches the command for the result.

use once_cell::sync::Lazy;

/// One class of path-mutating shell idiom
#[derive(Debug, Clone, Copy)]
pub struct OperationTemplate {
    /// Regex skeleton containing `{path}`
    pub pattern: &'static str,

    /// Operation label used in block reasons
    pub operation: &'static str,
}

impl OperationTemplate {
    pub const fn new(pattern: &'static str, operation: &'static str) -> Self {
        Self { pattern, operation }
    }
}

pub const WRITE: &[OperationTemplate] = &[
    OperationTemplate::new(r">\s*{path}", "write"),
    OperationTemplate::new(r"\btee\s+(?!.*-a).*{path}", "write"),
];

pub const APPEND: &[OperationTemplate] = &[
    OperationTemplate::new(r">>\s*{path}", "append"),
    OperationTemplate::new(r"\btee\s+-a\s+.*{path}", "append"),
    OperationTemplate::new(r"\btee\s+.*-a.*{path}", "append"),
];

pub const EDIT: &[OperationTemplate] = &[
    OperationTemplate::new(r"\bsed\s+-i.*{path}", "edit"),
    OperationTemplate::new(r"\bperl\s+-[^\s]*i.*{path}", "edit"),
    OperationTemplate::new(r"\bawk\s+-i\s+inplace.*{path}", "edit"),
];

pub const MOVE_COPY: &[OperationTemplate] = &[
    OperationTemplate::new(r"\bmv\s+.*\s+{path}", "move"),
    OperationTemplate::new(r"\bcp\s+.*\s+{path}", "copy"),
];

pub const DELETE: &[OperationTemplate] = &[
    OperationTemplate::new(r"\brm\s+.*{path}", "delete"),
    OperationTemplate::new(r"\bunlink\s+.*{path}", "delete"),
    OperationTemplate::new(r"\brmdir\s+.*{path}", "delete"),
    OperationTemplate::new(r"\bshred\s+.*{path}", "delete"),
];

pub const PERMISSION: &[OperationTemplate] = &[
    OperationTemplate::new(r"\bchmod\s+.*{path}", "chmod"),
    OperationTemplate::new(r"\bchown\s+.*{path}", "chown"),
    OperationTemplate::new(r"\bchgrp\s+.*{path}", "chgrp"),
];

pub const TRUNCATE: &[OperationTemplate] = &[
    OperationTemplate::new(r"\btruncate\s+.*{path}", "truncate"),
    OperationTemplate::new(r":\s*>\s*{path}", "truncate"),
];

/// Every mutating idiom; applied to read-only paths
pub static READ_ONLY_BLOCKED: Lazy<Vec<OperationTemplate>> = Lazy::new(|| {
    [WRITE, APPEND, EDIT, MOVE_COPY, DELETE, PERMISSION, TRUNCATE].concat()
});

/// Deletion idioms only; applied to no-delete paths
pub const NO_DELETE_BLOCKED: &[OperationTemplate] = DELETE;
