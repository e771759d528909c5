//! Scanner configuration.

use serde::Deserialize;

use crate::extract::DEFAULT_MAX_DEPTH;

/// Scanner configuration loaded from environment variables.
///
/// Environment variables are prefixed with `PLAYBOOK_MODULES_`:
/// - `PLAYBOOK_MODULES_EXTENSIONS`: comma-separated accepted file extensions (default: ".yml,.yaml")
/// - `PLAYBOOK_MODULES_MAX_DEPTH`: maximum list nesting depth (default: 128)
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Accepted file name suffixes
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Maximum list nesting depth before a file is skipped
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_extensions() -> Vec<String> {
    vec![".yml".to_string(), ".yaml".to_string()]
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            max_depth: default_max_depth(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("PLAYBOOK_MODULES_").from_env::<ScanConfig>()
    }
}
