use serde::Deserialize;

use crate::{join_base_path, PREDICT_PATH};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub predictor: PredictorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl PredictorConfig {
    /// Checks the endpoint settings and returns the full prediction URL.
    pub fn validate(&self) -> Result<String, String> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err("base_url must start with http:// or https://".to_string());
        }
        if self.path.trim().is_empty() {
            return Err("path must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        join_base_path(base_url, self.path.trim())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_path() -> String {
    PREDICT_PATH.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
