use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::{PdfAdapter, PlainTextAdapter};

/// Routes each upload to the loader registered for its content type.
#[derive(Default)]
pub struct CompositeFileLoader {
    loaders: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `loader` for `content_type`, replacing any earlier one.
    pub fn with_loader(mut self, content_type: ContentType, loader: Arc<dyn FileLoader>) -> Self {
        self.loaders.insert(content_type, loader);
        self
    }

    pub fn with_default_adapters() -> Self {
        Self::new()
            .with_loader(ContentType::Text, Arc::new(PlainTextAdapter))
            .with_loader(ContentType::Pdf, Arc::new(PdfAdapter::new()))
    }

    pub fn supports(&self, content_type: ContentType) -> bool {
        self.loaders.contains_key(&content_type)
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let mime = document.content_type.as_mime();
        let Some(loader) = self.loaders.get(&document.content_type) else {
            tracing::warn!(content_type = mime, "No loader registered");
            return Err(FileLoaderError::UnsupportedContentType(mime.to_string()));
        };

        tracing::debug!(content_type = mime, filename = %document.filename, "Dispatching extraction");
        loader.extract_text(data, document).await
    }
}
