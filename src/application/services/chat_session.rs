use std::sync::Arc;

use crate::application::ports::{
    CompletionClient, CompletionError, FileLoader, FileLoaderError, SessionObserver,
};
use crate::domain::{
    ChatTurn, CompletionRequest, ContentType, Document, DocumentStatus, FileSelection,
    Transcript, UploadedDocument,
};

use super::context_composer::{compose_prompt, has_document_context};

pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key is missing. Please set your Gemini API key (GEMINI_API_KEY or gemini.api_key in the configuration).";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("message is empty")]
    EmptyInput,
    #[error("a message is already being sent")]
    SubmissionInFlight,
}

/// Owns everything the chat screen shows: the document slot, the transcript and
/// the submission state. Views follow along through a `SessionObserver`.
pub struct ChatSession<C, F>
where
    C: CompletionClient + ?Sized,
    F: FileLoader + ?Sized,
{
    completion_client: Arc<C>,
    file_loader: Arc<F>,
    observer: Arc<dyn SessionObserver>,
    document: UploadedDocument,
    transcript: Transcript,
    system_instruction: String,
    max_context_chars: usize,
    state: SubmissionState,
}

impl<C, F> ChatSession<C, F>
where
    C: CompletionClient + ?Sized,
    F: FileLoader + ?Sized,
{
    pub fn new(
        completion_client: Arc<C>,
        file_loader: Arc<F>,
        observer: Arc<dyn SessionObserver>,
        max_context_chars: usize,
    ) -> Self {
        Self {
            completion_client,
            file_loader,
            observer,
            document: UploadedDocument::default(),
            transcript: Transcript::new(),
            system_instruction: String::new(),
            max_context_chars,
            state: SubmissionState::Idle,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn document(&self) -> &UploadedDocument {
        &self.document
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// A blank instruction means the client default is used.
    pub fn set_system_instruction(&mut self, instruction: impl Into<String>) {
        self.system_instruction = instruction.into().trim().to_string();
    }

    pub fn can_send(&self, input: &str) -> bool {
        self.state == SubmissionState::Idle && !input.trim().is_empty()
    }

    #[tracing::instrument(
        skip(self, selection),
        fields(path = %selection.path.display(), media_type = %selection.media_type)
    )]
    pub async fn attach_file(&mut self, selection: &FileSelection) -> DocumentStatus {
        let filename = selection.filename();
        self.set_document(UploadedDocument::processing(filename.clone()));

        let document = match self.load_document(selection, &filename).await {
            Ok(text) => {
                tracing::info!(chars = text.chars().count(), "Document ready");
                UploadedDocument::ready(filename, text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Document extraction failed");
                UploadedDocument::failed(filename, e.status_message())
            }
        };

        self.set_document(document);
        self.document.status.clone()
    }

    pub fn clear_document(&mut self) {
        self.set_document(UploadedDocument::default());
    }

    /// Appends the user turn, runs one completion exchange and appends the
    /// assistant turn, which is returned. Failures become assistant turns too.
    #[tracing::instrument(skip(self, input), fields(submission_id = %uuid::Uuid::new_v4()))]
    pub async fn send(&mut self, input: &str) -> Result<ChatTurn, SessionError> {
        if self.state == SubmissionState::Sending {
            return Err(SessionError::SubmissionInFlight);
        }
        let question = input.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.append(ChatTurn::user(question));

        // Later document changes do not affect this request.
        let context = self.document.extracted_text.clone();
        let prompt = compose_prompt(question, &context, self.max_context_chars);
        let request = CompletionRequest::new(
            prompt,
            self.system_instruction.clone(),
            !has_document_context(&context),
        );

        // Dropping this future mid-request still returns the session to Idle.
        let submission = SubmissionGuard::begin(&mut self.state, self.observer.as_ref());

        let reply = match self.completion_client.complete(&request).await {
            Ok(result) => ChatTurn::assistant(result.answer_text, result.sources),
            Err(e) => {
                tracing::error!(error = %e, "Completion failed");
                ChatTurn::assistant(user_facing_error(&e), Vec::new())
            }
        };

        let reply = append_turn(&mut self.transcript, self.observer.as_ref(), reply);
        drop(submission);
        Ok(reply)
    }

    async fn load_document(
        &self,
        selection: &FileSelection,
        filename: &str,
    ) -> Result<String, FileLoaderError> {
        let content_type = ContentType::from_mime(&selection.media_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(selection.media_type.clone())
        })?;

        let data = tokio::fs::read(&selection.path)
            .await
            .map_err(|e| FileLoaderError::ReadFailed(e.to_string()))?;

        let document = Document::new(filename.to_string(), content_type, data.len() as u64);
        self.file_loader.extract_text(&data, &document).await
    }

    fn append(&mut self, turn: ChatTurn) -> ChatTurn {
        append_turn(&mut self.transcript, self.observer.as_ref(), turn)
    }

    fn set_document(&mut self, document: UploadedDocument) {
        self.document = document;
        self.observer.document_status_changed(&self.document.status);
    }
}

fn append_turn(
    transcript: &mut Transcript,
    observer: &dyn SessionObserver,
    turn: ChatTurn,
) -> ChatTurn {
    let turn = transcript.push(turn).clone();
    observer.turn_appended(&turn);
    observer.scroll_to_bottom();
    turn
}

/// Holds the session in `Sending` and flips it back to `Idle` when dropped.
struct SubmissionGuard<'a> {
    state: &'a mut SubmissionState,
    observer: &'a dyn SessionObserver,
}

impl<'a> SubmissionGuard<'a> {
    fn begin(state: &'a mut SubmissionState, observer: &'a dyn SessionObserver) -> Self {
        *state = SubmissionState::Sending;
        observer.submission_state_changed(SubmissionState::Sending);
        Self { state, observer }
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        *self.state = SubmissionState::Idle;
        self.observer.submission_state_changed(SubmissionState::Idle);
    }
}

pub fn user_facing_error(error: &CompletionError) -> String {
    match error {
        CompletionError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
        other => format!(
            "I'm having trouble connecting. Error: {}. Please check the logs and ensure your API key is correct.",
            other
        ),
    }
}
