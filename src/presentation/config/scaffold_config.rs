use std::time::Duration;

/// Offline mode: answers come from `MockCompletionClient` and nothing is sent
/// to the API. Driven by `SCAFFOLD_MODE` and `MOCK_RESPONSE_DELAY` (ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub response_delay: Duration,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SCAFFOLD_MODE").ok().as_deref(),
            std::env::var("MOCK_RESPONSE_DELAY").ok().as_deref(),
        )
    }

    pub fn from_values(mode: Option<&str>, delay_ms: Option<&str>) -> Self {
        let enabled = mode.is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        });
        let response_delay = delay_ms
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_default();

        Self {
            enabled,
            response_delay,
        }
    }
}
