use crate::application::services::SubmissionState;
use crate::domain::{ChatTurn, DocumentStatus};

/// View side of a chat session. Called synchronously on every state change.
pub trait SessionObserver: Send + Sync {
    fn turn_appended(&self, turn: &ChatTurn);

    fn submission_state_changed(&self, state: SubmissionState);

    fn document_status_changed(&self, status: &DocumentStatus);

    fn scroll_to_bottom(&self) {}
}

/// Observer for headless use.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn turn_appended(&self, _turn: &ChatTurn) {}

    fn submission_state_changed(&self, _state: SubmissionState) {}

    fn document_status_changed(&self, _status: &DocumentStatus) {}
}
