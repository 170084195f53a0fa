use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, ExtractedDocument};

/// Turns an upload into a document plus its extracted text.
pub struct DocumentService {
    file_loader: Arc<dyn FileLoader>,
}

impl DocumentService {
    pub fn new(file_loader: Arc<dyn FileLoader>) -> Self {
        Self { file_loader }
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(
        &self,
        filename: &str,
        declared_mime: &str,
        data: &[u8],
    ) -> Result<ExtractedDocument, FileLoaderError> {
        let content_type = ContentType::from_mime(declared_mime)
            .ok_or_else(|| FileLoaderError::UnsupportedContentType(declared_mime.to_string()))?;

        let document = Document::new(filename.to_string(), content_type, data.len() as u64);
        let text = self.file_loader.extract_text(data, &document).await?;

        tracing::info!(
            document_id = %document.id.as_uuid(),
            content_type = content_type.as_mime(),
            chars = text.chars().count(),
            "Document text extracted"
        );

        Ok(ExtractedDocument { document, text })
    }
}
