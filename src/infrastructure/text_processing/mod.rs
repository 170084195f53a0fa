mod composite_file_loader;
mod docx_adapter;
mod extractor_factory;
mod pdf_adapter;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::{DocxAdapter, body_paragraphs};
pub use extractor_factory::ExtractorFactory;
pub use pdf_adapter::{DEFAULT_EXTRACTION_TIMEOUT, PdfAdapter, page_texts};
