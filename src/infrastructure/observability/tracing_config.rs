#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` switches to JSON even when the settings file does not.
    pub fn resolve(enable_json: bool, log_format_var: Option<&str>) -> Self {
        let forced = log_format_var.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"));
        if enable_json || forced {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub environment: String,
    pub format: LogFormat,
    pub level: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: impl Into<String>, enable_json: bool) -> Self {
        let log_format = std::env::var("LOG_FORMAT").ok();
        Self {
            environment: environment.into(),
            format: LogFormat::resolve(enable_json, log_format.as_deref()),
            level: level.into(),
        }
    }

    /// Filter used when `RUST_LOG` is unset. Dependencies stay at `warn`.
    pub fn default_directive(&self) -> String {
        format!("warn,docchat={}", self.level.trim().to_lowercase())
    }
}
