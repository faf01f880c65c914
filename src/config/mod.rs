use config::{Config, File};
use serde::Deserialize;
use std::env;

use crate::utils::error::{AppError, Result};
use crate::utils::prompt_similarity::{BlankPairPolicy, SimilarityStrategy};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub similarity: SimilaritySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout: u64, // milliseconds
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String, // "json" or "pretty"
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimilaritySettings {
    pub strategy: SimilarityStrategy,
    pub blank_pair_policy: BlankPairPolicy,
    pub duplicate_threshold: f64,
    /// Prompts longer than this (in characters) are rejected before scoring
    pub max_prompt_chars: usize,
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self {
            strategy: SimilarityStrategy::Weighted,
            blank_pair_policy: BlankPairPolicy::Native,
            duplicate_threshold: 0.9,
            max_prompt_chars: 200_000,
        }
    }
}

/// Environment variable → config key overrides
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("CAPTURE_SERVER__HOST", "server.host"),
    ("CAPTURE_SERVER__PORT", "server.port"),
    ("CAPTURE_SERVER__REQUEST_TIMEOUT", "server.request_timeout"),
    ("CAPTURE_LOGGING__LEVEL", "logging.level"),
    ("CAPTURE_LOGGING__FORMAT", "logging.format"),
    ("CAPTURE_SIMILARITY__STRATEGY", "similarity.strategy"),
    ("CAPTURE_SIMILARITY__BLANK_PAIR_POLICY", "similarity.blank_pair_policy"),
    ("CAPTURE_SIMILARITY__DUPLICATE_THRESHOLD", "similarity.duplicate_threshold"),
    ("CAPTURE_SIMILARITY__MAX_PROMPT_CHARS", "similarity.max_prompt_chars"),
];

impl Settings {
    pub fn new() -> Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.request_timeout", 30000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("similarity.strategy", "weighted")?
            .set_default("similarity.blank_pair_policy", "native")?
            .set_default("similarity.duplicate_threshold", 0.9)?
            .set_default("similarity.max_prompt_chars", 200_000)?
            // Load config file if exists
            .add_source(File::with_name("config/config").required(false))
            .add_source(File::with_name(&format!("config/config.{}", run_mode)).required(false));

        // Explicit overrides; the Environment source mangles snake_case keys
        for (var, key) in ENV_OVERRIDES {
            if let Ok(val) = env::var(var) {
                builder = builder.set_override(*key, val)?;
            }
        }

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.similarity.duplicate_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::ValidationError(format!(
                "Duplicate threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        if self.similarity.max_prompt_chars == 0 {
            return Err(AppError::ValidationError(
                "Max prompt length must be greater than 0".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Invalid logging level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Invalid logging format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            )));
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout: 30000,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
        similarity: SimilaritySettings::default(),
    }
}
