use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileLoader;
use crate::domain::ContentType;
use crate::presentation::config::ExtractionSettings;

use super::composite_file_loader::CompositeFileLoader;
use super::docx_adapter::DocxAdapter;
use super::pdf_adapter::PdfAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Loader that routes PDF and DOCX uploads to their adapters.
    pub fn create(settings: &ExtractionSettings) -> Arc<dyn FileLoader> {
        let timeout = Duration::from_secs(settings.pdf_timeout_secs);
        tracing::info!(pdf_timeout_secs = settings.pdf_timeout_secs, "Building text extractors");

        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::with_timeout(timeout));
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new());

        Arc::new(CompositeFileLoader::new(vec![
            (ContentType::Pdf, pdf),
            (ContentType::Docx, docx),
        ]))
    }
}
