use std::fmt;

pub const UNSUPPORTED_FILE_MESSAGE: &str = "Unsupported file type.";
pub const READ_ERROR_MESSAGE: &str = "Error reading file.";
pub const PARSE_ERROR_MESSAGE: &str = "Error reading PDF.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    #[default]
    None,
    Processing {
        filename: String,
    },
    Ready {
        filename: String,
    },
    Error {
        message: String,
    },
}

impl DocumentStatus {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The clear action is only offered once a document has been extracted.
    pub fn is_clearable(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "No file selected."),
            Self::Processing { filename } => write!(f, "Processing: {}...", filename),
            Self::Ready { filename } => write!(f, "{}", filename),
            Self::Error { message } => write!(f, "{}", message),
        }
    }
}

/// The single document slot of a chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedDocument {
    pub filename: Option<String>,
    pub extracted_text: String,
    pub status: DocumentStatus,
}

impl UploadedDocument {
    pub fn processing(filename: String) -> Self {
        Self {
            status: DocumentStatus::Processing {
                filename: filename.clone(),
            },
            filename: Some(filename),
            extracted_text: String::new(),
        }
    }

    pub fn ready(filename: String, extracted_text: String) -> Self {
        Self {
            status: DocumentStatus::Ready {
                filename: filename.clone(),
            },
            filename: Some(filename),
            extracted_text,
        }
    }

    pub fn failed(filename: String, message: &str) -> Self {
        Self {
            filename: Some(filename),
            extracted_text: String::new(),
            status: DocumentStatus::error(message),
        }
    }

    pub fn has_context(&self) -> bool {
        !self.extracted_text.is_empty()
    }
}
