use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use docchat::application::ports::{
    CompletionError, FileLoader, FileLoaderError, SessionObserver,
};
use docchat::application::services::{
    ChatSession, MAX_CONTEXT_CHARS, MISSING_CREDENTIAL_MESSAGE, SessionError, SubmissionState,
};
use docchat::domain::{
    ChatTurn, CompletionResult, Document, DocumentStatus, FileSelection, PARSE_ERROR_MESSAGE,
    READ_ERROR_MESSAGE, Source, Speaker, StopReason, UNSUPPORTED_FILE_MESSAGE,
};
use docchat::infrastructure::llm::MockCompletionClient;
use docchat::infrastructure::text_processing::CompositeFileLoader;

struct CountingFileLoader {
    calls: AtomicUsize,
}

impl CountingFileLoader {
    fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl FileLoader for CountingFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl SessionObserver for RecordingObserver {
    fn turn_appended(&self, turn: &ChatTurn) {
        self.events
            .lock()
            .unwrap()
            .push(format!("turn:{}", turn.speaker));
    }

    fn submission_state_changed(&self, state: SubmissionState) {
        self.events.lock().unwrap().push(format!("state:{state:?}"));
    }

    fn document_status_changed(&self, status: &DocumentStatus) {
        self.events.lock().unwrap().push(format!("status:{status}"));
    }

    fn scroll_to_bottom(&self) {
        self.events.lock().unwrap().push("scroll".to_string());
    }
}

fn session_with(
    client: Arc<MockCompletionClient>,
    loader: Arc<CountingFileLoader>,
    observer: Arc<RecordingObserver>,
) -> ChatSession<MockCompletionClient, CountingFileLoader> {
    ChatSession::new(client, loader, observer, MAX_CONTEXT_CHARS)
}

fn text_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn given_no_document_when_sending_then_grounding_enabled_and_prompt_is_question() {
    let client = Arc::new(MockCompletionClient::with_result(CompletionResult::text("4")));
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let reply = session.send("What is 2+2?").await.unwrap();

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt(), "What is 2+2?");
    assert!(requests[0].grounding_enabled());
    assert_eq!(reply.speaker, Speaker::Assistant);
    assert_eq!(reply.text, "4");
    assert!(reply.sources.is_empty());
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(session.transcript().turns()[0].text, "What is 2+2?");
}

#[tokio::test]
async fn given_attached_text_file_when_sending_then_prompt_wraps_document_without_grounding() {
    let client = Arc::new(MockCompletionClient::new());
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );
    let file = text_file("Chapter one text.");

    let status = session
        .attach_file(&FileSelection::new(file.path(), "text/plain"))
        .await;
    session.send("Summarize").await.unwrap();

    assert!(matches!(status, DocumentStatus::Ready { .. }));
    let request = &client.requests()[0];
    assert!(request.prompt().contains("--- CONTEXT START ---\nChapter one text.\n--- CONTEXT END ---"));
    assert!(request.prompt().ends_with("Question: Summarize"));
    assert!(!request.grounding_enabled());
}

#[tokio::test]
async fn given_unsupported_media_type_when_attaching_then_error_status_and_loader_not_called() {
    let loader = Arc::new(CountingFileLoader::ok());
    let mut session = session_with(
        Arc::new(MockCompletionClient::new()),
        Arc::clone(&loader),
        Arc::new(RecordingObserver::default()),
    );
    let file = text_file("irrelevant");

    let status = session
        .attach_file(&FileSelection::new(file.path(), "image/png"))
        .await;

    assert_eq!(status, DocumentStatus::error(UNSUPPORTED_FILE_MESSAGE));
    assert!(session.document().extracted_text.is_empty());
    assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_ready_document_when_new_upload_fails_then_previous_text_is_cleared() {
    let client = Arc::new(MockCompletionClient::new());
    let mut session = ChatSession::new(
        Arc::clone(&client),
        Arc::new(CompositeFileLoader::with_default_adapters()),
        Arc::new(RecordingObserver::default()),
        MAX_CONTEXT_CHARS,
    );
    let good = text_file("Working document.");
    let broken = text_file("%PDF-broken");

    let first = session
        .attach_file(&FileSelection::new(good.path(), "text/plain"))
        .await;
    assert!(matches!(first, DocumentStatus::Ready { .. }));
    assert!(session.document().has_context());

    let second = session
        .attach_file(&FileSelection::new(broken.path(), "application/pdf"))
        .await;
    session.send("Anything?").await.unwrap();

    assert_eq!(second, DocumentStatus::error(PARSE_ERROR_MESSAGE));
    assert!(!session.document().has_context());
    assert!(session.document().extracted_text.is_empty());
    let request = &client.requests()[0];
    assert!(request.grounding_enabled());
    assert_eq!(request.prompt(), "Anything?");
}

#[tokio::test]
async fn given_five_page_pdf_when_summarizing_then_prompt_wraps_pages_without_grounding() {
    let client = Arc::new(MockCompletionClient::new());
    let mut session = ChatSession::new(
        Arc::clone(&client),
        Arc::new(CompositeFileLoader::with_default_adapters()),
        Arc::new(RecordingObserver::default()),
        MAX_CONTEXT_CHARS,
    );
    let mut pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    pdf.write_all(include_bytes!("../infrastructure/fixtures/five_pages.pdf"))
        .unwrap();

    let status = session.attach_file(&FileSelection::from_path(pdf.path())).await;
    session.send("Summarize").await.unwrap();

    assert!(matches!(status, DocumentStatus::Ready { .. }));
    let request = &client.requests()[0];
    assert_eq!(
        request.prompt(),
        "Based on the following context, please answer the user's question.\n\n\
         --- CONTEXT START ---\n\
         First pageSecond pageThird pageFourth pageFifth page\n\
         --- CONTEXT END ---\n\n\
         Question: Summarize"
    );
    assert!(!request.grounding_enabled());
}

#[tokio::test]
async fn given_missing_file_when_attaching_then_read_error_status() {
    let mut session = session_with(
        Arc::new(MockCompletionClient::new()),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let status = session
        .attach_file(&FileSelection::new("/definitely/not/here.txt", "text/plain"))
        .await;

    assert_eq!(status, DocumentStatus::error(READ_ERROR_MESSAGE));
}

#[tokio::test]
async fn given_cleared_document_when_sending_then_grounding_is_enabled_again() {
    let client = Arc::new(MockCompletionClient::new());
    let observer = Arc::new(RecordingObserver::default());
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::clone(&observer),
    );
    let file = text_file("context");
    session
        .attach_file(&FileSelection::new(file.path(), "text/plain"))
        .await;

    session.clear_document();
    session.send("Plain question").await.unwrap();

    assert_eq!(session.document().status, DocumentStatus::None);
    assert_eq!(client.requests()[0].prompt(), "Plain question");
    assert!(client.requests()[0].grounding_enabled());
    assert!(observer.events().contains(&"status:No file selected.".to_string()));
}

#[tokio::test]
async fn given_blank_input_when_sending_then_rejected_and_transcript_unchanged() {
    let client = Arc::new(MockCompletionClient::new());
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let result = session.send("   ").await;

    assert_eq!(result, Err(SessionError::EmptyInput));
    assert!(session.transcript().is_empty());
    assert!(client.requests().is_empty());
    assert!(!session.can_send("  "));
    assert!(session.can_send("hello"));
}

#[tokio::test]
async fn given_exhausted_retries_when_sending_then_appends_connectivity_error_turn() {
    let error = CompletionError::RetriesExhausted {
        attempts: 3,
        last: Box::new(CompletionError::Http {
            status: 503,
            message: "The model is overloaded".to_string(),
        }),
    };
    let mut session = session_with(
        Arc::new(MockCompletionClient::with_error(error)),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let reply = session.send("Hello").await.unwrap();

    assert!(reply.text.starts_with("I'm having trouble connecting."));
    assert!(reply.text.contains("HTTP error! status: 503 - The model is overloaded"));
    assert_eq!(session.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn given_missing_credential_when_sending_then_appends_configuration_message() {
    let mut session = session_with(
        Arc::new(MockCompletionClient::with_error(CompletionError::MissingCredential)),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let reply = session.send("Hello").await.unwrap();

    assert_eq!(reply.text, MISSING_CREDENTIAL_MESSAGE);
}

#[tokio::test]
async fn given_send_when_observed_then_state_and_scroll_follow_each_append() {
    let observer = Arc::new(RecordingObserver::default());
    let mut session = session_with(
        Arc::new(MockCompletionClient::new()),
        Arc::new(CountingFileLoader::ok()),
        Arc::clone(&observer),
    );

    session.send("Hi").await.unwrap();

    assert_eq!(
        observer.events(),
        vec![
            "turn:user",
            "scroll",
            "state:Sending",
            "turn:assistant",
            "scroll",
            "state:Idle",
        ]
    );
}

#[tokio::test]
async fn given_custom_system_instruction_when_sending_then_request_carries_it() {
    let client = Arc::new(MockCompletionClient::new());
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    session.set_system_instruction("  Answer in French.  ");
    session.send("Hi").await.unwrap();
    session.set_system_instruction("   ");
    session.send("Hi again").await.unwrap();

    let requests = client.requests();
    assert_eq!(requests[0].system_instruction(), "Answer in French.");
    assert_eq!(requests[1].system_instruction(), "");
}

#[tokio::test]
async fn given_result_with_sources_when_sending_then_assistant_turn_keeps_them_in_order() {
    let sources = vec![
        Source::new("https://one.example", "One").unwrap(),
        Source::new("https://two.example", "Two").unwrap(),
    ];
    let result = CompletionResult::new("Grounded".to_string(), sources.clone(), StopReason::Stop);
    let mut session = session_with(
        Arc::new(MockCompletionClient::with_result(result)),
        Arc::new(CountingFileLoader::ok()),
        Arc::new(RecordingObserver::default()),
    );

    let reply = session.send("Search this").await.unwrap();

    assert_eq!(reply.sources, sources);
}

#[tokio::test(start_paused = true)]
async fn given_send_dropped_mid_request_when_checking_state_then_session_is_idle_again() {
    let observer = Arc::new(RecordingObserver::default());
    let client = Arc::new(MockCompletionClient::new().delayed(Duration::from_secs(10)));
    let mut session = session_with(
        Arc::clone(&client),
        Arc::new(CountingFileLoader::ok()),
        Arc::clone(&observer),
    );

    let timed_out = tokio::time::timeout(Duration::from_secs(1), session.send("hi")).await;

    assert!(timed_out.is_err());
    assert_eq!(session.state(), SubmissionState::Idle);
    assert!(session.can_send("again"));
    assert_eq!(observer.events().last().map(String::as_str), Some("state:Idle"));

    let reply = session.send("again").await.unwrap();
    assert_eq!(reply.text, "Mock answer");
    assert_eq!(session.transcript().len(), 3);
}
