use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &std::path::Path) -> Result<Vec<Vec<String>>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ParseFailed(format!("failed to open PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ParseFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let text = doc.extract_text(page_index).unwrap_or_else(|e| {
                tracing::warn!(page_index, error = %e, "Skipping unreadable PDF page");
                String::new()
            });
            pages.push(page_fragments(&text));
        }

        Ok(pages)
    }
}

fn page_fragments(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Joins each page's text fragments with single spaces, then concatenates the
/// pages in order.
pub fn assemble_page_text<P, S>(pages: P) -> String
where
    P: IntoIterator,
    P::Item: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let mut first = true;
        for fragment in page {
            if !first {
                text.push(' ');
            }
            text.push_str(fragment.as_ref());
            first = false;
        }
    }
    text
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            filename = %document.filename,
            size_bytes = document.size_bytes,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ReadFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ReadFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileLoaderError::ParseFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ParseFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(assemble_page_text(pages))
    }
}
