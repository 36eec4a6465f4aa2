use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::{MAX_CONTEXT_CHARS, RetryPolicy};
use crate::infrastructure::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use super::Environment;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant. Answer clearly and concisely. When context from a document is provided, base your answer on it.";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub gemini: GeminiSettings,
    pub retry: RetrySettings,
    pub chat: ChatSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl GeminiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub multiplier: u32,
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            self.multiplier,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub default_system_instruction: String,
    pub max_context_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Settings {
    /// Layers built-in defaults, `base` and per-environment files from
    /// `config_dir`, `DOCCHAT__SECTION__KEY` variables and finally
    /// `GEMINI_API_KEY`.
    pub fn load(config_dir: &Path, environment: Environment) -> Result<Self, SettingsError> {
        let base = config_dir.join("base");
        let per_environment = config_dir.join(environment.config_file_stem());

        let mut builder = Config::builder()
            .set_default("gemini.api_key", "")?
            .set_default("gemini.model", DEFAULT_MODEL)?
            .set_default("gemini.base_url", DEFAULT_BASE_URL)?
            .set_default("gemini.request_timeout_secs", 60_i64)?
            .set_default("retry.max_attempts", 3_i64)?
            .set_default("retry.initial_backoff_ms", 1000_i64)?
            .set_default("retry.multiplier", 2_i64)?
            .set_default("chat.default_system_instruction", DEFAULT_SYSTEM_INSTRUCTION)?
            .set_default("chat.max_context_chars", MAX_CONTEXT_CHARS as i64)?
            .set_default("logging.level", "warn")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(File::with_name(&per_environment.to_string_lossy()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("DOCCHAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                builder = builder.set_override("gemini.api_key", api_key)?;
            }
        }

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
