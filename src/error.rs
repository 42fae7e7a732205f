//! Error types for damage-control
//!
//! Decisions are never errors. These types cover the ways the surrounding
//! I/O can fail and the per-rule regex failures the engine skips over.

use std::path::PathBuf;

use thiserror::Error;

/// The hook envelope could not be read or understood
#[derive(Debug, Error)]
pub enum InputError {
    #[error("error reading input: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON input: expected an object, got {0}")]
    NotAnObject(&'static str),
}

/// A configuration source could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A single rule or template produced a regex the engine could not run
#[derive(Debug, Error)]
#[error("bad pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: Box<fancy_regex::Error>,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, source: fancy_regex::Error) -> Self {
        Self {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }
}
