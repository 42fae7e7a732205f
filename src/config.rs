//! Settings loading for damage-control
//!
//! Rules live in YAML pattern files. This TOML file only holds settings
//! for the hook itself: auditing and where to find the patterns.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::pattern::path::expand_home;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: false,
            audit_path: Some("~/.claude/hooks/damage-control/audit.jsonl".to_string()),
        }
    }
}

/// Pattern source section
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PatternsConfig {
    /// Pattern directory or file, overriding discovery
    pub path: Option<String>,
}

/// Main settings structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralConfig,
    pub patterns: PatternsConfig,
}

impl Settings {
    /// Load settings from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific settings
            dirs::home_dir().map(|p| p.join(".claude/hooks/damage-control/config.toml")),
            // System-wide settings
            Some(PathBuf::from("/etc/damage-control/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(settings) => return settings,
                Err(e) => eprintln!("Warning: {}", e),
            }
        }

        Settings::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the audit log path (expanded), if auditing is on
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general
            .audit_path
            .as_deref()
            .map(|p| PathBuf::from(expand_home(p)))
    }

    /// Get the configured pattern source (expanded)
    pub fn patterns_path(&self) -> Option<PathBuf> {
        self.patterns
            .path
            .as_deref()
            .map(|p| PathBuf::from(expand_home(p)))
    }
}
