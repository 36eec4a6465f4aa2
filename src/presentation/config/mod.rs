mod environment;
mod scaffold_config;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment, UnknownEnvironment};
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    ChatSettings, DEFAULT_SYSTEM_INSTRUCTION, GeminiSettings, LoggingSettings, RetrySettings,
    Settings, SettingsError,
};
