//! Application settings for spendwise
//!
//! Settings cover the remote backend and AI endpoints. Per-user preferences
//! (budget threshold, currency) live in the profile store, not here, so that
//! they follow the user between guest and authenticated modes.

use serde::{Deserialize, Serialize};

use super::paths::SpendwisePaths;
use crate::error::SpendwiseError;

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the hosted backend (auth + REST)
    #[serde(default)]
    pub api_url: Option<String>,

    /// Public API key sent with every backend request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint for the AI flows
    #[serde(default)]
    pub ai_url: Option<String>,

    /// Model name sent to the AI endpoint
    #[serde(default = "default_ai_model")]
    pub ai_model: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: None,
            api_key: None,
            ai_url: None,
            ai_model: default_ai_model(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendwisePaths) -> Result<Self, SpendwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SpendwiseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendwisePaths) -> Result<(), SpendwiseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendwiseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendwiseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Backend base URL, with `SPENDWISE_API_URL` taking precedence
    pub fn api_url(&self) -> Option<String> {
        std::env::var("SPENDWISE_API_URL")
            .ok()
            .or_else(|| self.api_url.clone())
    }

    /// Backend API key, with `SPENDWISE_API_KEY` taking precedence
    pub fn api_key(&self) -> Option<String> {
        std::env::var("SPENDWISE_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
    }

    /// AI endpoint URL, with `SPENDWISE_AI_URL` taking precedence
    pub fn ai_url(&self) -> Option<String> {
        std::env::var("SPENDWISE_AI_URL")
            .ok()
            .or_else(|| self.ai_url.clone())
    }

    /// AI API key; only read from `SPENDWISE_AI_API_KEY` so it never lands on
    /// disk
    pub fn ai_api_key(&self) -> Option<String> {
        std::env::var("SPENDWISE_AI_API_KEY").ok()
    }
}
