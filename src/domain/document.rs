use std::path::{Path, PathBuf};

/// Descriptor handed to a `FileLoader` alongside the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Text,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Text => "text/plain",
        }
    }
}

impl Document {
    pub fn new(filename: String, content_type: ContentType, size_bytes: u64) -> Self {
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }
}

/// A file picked by the user together with the media type it was declared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub path: PathBuf,
    pub media_type: String,
}

impl FileSelection {
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.into(),
        }
    }

    /// Declares the media type from the file extension, the way a browser file
    /// picker would.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = media_type_for_extension(&path).to_string();
        Self { path, media_type }
    }

    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn media_type_for_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("txt") | Some("text") => ContentType::Text.as_mime(),
        Some("pdf") => ContentType::Pdf.as_mime(),
        _ => "application/octet-stream",
    }
}
