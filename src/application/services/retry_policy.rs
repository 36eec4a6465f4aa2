use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(1000);
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    Permanent(E),
    Exhausted { attempts: u32, last: E },
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration, multiplier: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            multiplier,
        }
    }

    /// Delay before the retry that follows the `retry`-th failure, counting from zero.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error, or
    /// the attempt budget is spent. The closure receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        mut operation: F,
        is_retryable: P,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !is_retryable(&e) => return Err(RetryError::Permanent(e)),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!(attempt, error = %e, "All attempts failed");
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.backoff_for(attempt - 1);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
