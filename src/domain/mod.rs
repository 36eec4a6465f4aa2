mod chat_turn;
mod completion;
mod document;
mod source;
mod speaker;
mod text_direction;
mod transcript;
mod uploaded_document;

pub use chat_turn::ChatTurn;
pub use completion::{CompletionRequest, CompletionResult, StopReason};
pub use document::{ContentType, Document, FileSelection};
pub use source::Source;
pub use speaker::Speaker;
pub use text_direction::{Alignment, TextDirection};
pub use transcript::{NumberedSource, Transcript, TurnView};
pub use uploaded_document::{
    DocumentStatus, PARSE_ERROR_MESSAGE, READ_ERROR_MESSAGE, UNSUPPORTED_FILE_MESSAGE,
    UploadedDocument,
};
