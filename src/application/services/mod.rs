mod chat_session;
mod context_composer;
mod retry_policy;

pub use chat_session::{
    ChatSession, MISSING_CREDENTIAL_MESSAGE, SessionError, SubmissionState, user_facing_error,
};
pub use context_composer::{MAX_CONTEXT_CHARS, compose_prompt, has_document_context};
pub use retry_policy::{
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, RetryError,
    RetryPolicy,
};
