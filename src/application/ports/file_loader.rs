use async_trait::async_trait;

use crate::domain::{Document, PARSE_ERROR_MESSAGE, READ_ERROR_MESSAGE, UNSUPPORTED_FILE_MESSAGE};

/// Turns the raw bytes of one upload into plain text.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileLoaderError {
    #[error("{0} uploads are not supported")]
    UnsupportedContentType(String),
    #[error("could not read upload: {0}")]
    ReadFailed(String),
    #[error("could not extract text: {0}")]
    ParseFailed(String),
}

impl FileLoaderError {
    /// Status line shown in place of the filename.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::UnsupportedContentType(_) => UNSUPPORTED_FILE_MESSAGE,
            Self::ReadFailed(_) => READ_ERROR_MESSAGE,
            Self::ParseFailed(_) => PARSE_ERROR_MESSAGE,
        }
    }
}
