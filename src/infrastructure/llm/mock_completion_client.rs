use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{CompletionClient, CompletionError};
use crate::domain::{CompletionRequest, CompletionResult};

/// Scripted client for scaffold mode and tests. Remembers every request.
pub struct MockCompletionClient {
    response: Result<CompletionResult, CompletionError>,
    delay: Duration,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::with_result(CompletionResult::text("Mock answer"))
    }
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(result: CompletionResult) -> Self {
        Self {
            response: Ok(result),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_error(error: CompletionError) -> Self {
        Self {
            response: Err(error),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.response.clone()
    }
}
