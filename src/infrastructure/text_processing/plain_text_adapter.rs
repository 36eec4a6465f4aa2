use std::borrow::Cow;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

/// Reads `text/plain` uploads. Bytes that are not valid UTF-8 become U+FFFD
/// instead of failing the upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        match document.content_type {
            ContentType::Text => {}
            unsupported => {
                return Err(FileLoaderError::UnsupportedContentType(
                    unsupported.as_mime().to_string(),
                ));
            }
        }

        let text = String::from_utf8_lossy(data);
        if let Cow::Owned(_) = text {
            tracing::warn!(filename = %document.filename, "Replaced invalid UTF-8 in upload");
        }
        Ok(text.into_owned())
    }
}
