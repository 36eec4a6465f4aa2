use async_trait::async_trait;

use crate::domain::{CompletionRequest, CompletionResult};

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("API key is missing")]
    MissingCredential,
    #[error("HTTP error! status: {status} - {message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("{last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<CompletionError>,
    },
}

impl CompletionError {
    /// Network-level failures and non-success statuses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Network(_) | Self::InvalidResponse(_)
        )
    }
}
