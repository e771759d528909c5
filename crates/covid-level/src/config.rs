//! Data API configuration.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

use crate::error::LevelResult;

/// Configuration loaded from environment variables.
///
/// Environment variables are prefixed with `COVID_COUNTY_LEVEL_`:
/// - `COVID_COUNTY_LEVEL_APP_TOKEN`: Socrata app token; without one requests are rate-limited
/// - `COVID_COUNTY_LEVEL_BASE_URL`: data portal URL (default: "https://data.cdc.gov")
/// - `COVID_COUNTY_LEVEL_DATASET`: dataset identifier (default: "3nnm-4jni")
/// - `COVID_COUNTY_LEVEL_TIMEOUT_SECS`: request timeout (default: 10)
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// App token sent as `X-App-Token`
    #[serde(default, deserialize_with = "empty_as_none")]
    pub app_token: Option<String>,

    /// Data portal base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Community Levels by County dataset identifier
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://data.cdc.gov".to_string()
}

fn default_dataset() -> String {
    "3nnm-4jni".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|token| !token.is_empty()))
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            app_token: None,
            base_url: default_base_url(),
            dataset: default_dataset(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LevelConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> LevelResult<Self> {
        Ok(envy::prefixed("COVID_COUNTY_LEVEL_").from_env::<LevelConfig>()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the dataset's JSON resource.
    pub fn resource_url(&self) -> String {
        format!(
            "{}/resource/{}.json",
            self.base_url.trim_end_matches('/'),
            self.dataset
        )
    }
}
