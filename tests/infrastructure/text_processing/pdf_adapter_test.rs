use std::time::Duration;

use docassist::application::ports::{FileLoader, FileLoaderError};
use docassist::domain::{ContentType, Document};
use docassist::infrastructure::text_processing::{
    DEFAULT_EXTRACTION_TIMEOUT, PdfAdapter, page_texts,
};

use crate::helpers::fixtures::pdf_with_pages;

fn pdf_document(data: &[u8]) -> Document {
    Document::new("sample.pdf".to_string(), ContentType::Pdf, data.len() as u64)
}

#[tokio::test]
async fn given_pdf_with_blank_page_when_extracting_then_returns_one_segment_per_text_page() {
    let adapter = PdfAdapter::new();
    let data = pdf_with_pages(&[Some("Alpha"), None, Some("Delta")]);

    let text = adapter
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    let segments: Vec<&str> = text.split('\n').collect();
    assert_eq!(segments, vec!["Alpha", "Delta"]);
}

#[tokio::test]
async fn given_single_page_pdf_when_extracting_then_returns_its_text() {
    let adapter = PdfAdapter::new();
    let data = pdf_with_pages(&[Some("Hello world")]);

    let text = adapter
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    assert!(text.contains("Hello"));
    assert!(!text.contains('\n'));
}

#[tokio::test]
async fn given_pdf_without_text_when_extracting_then_returns_empty_string() {
    let adapter = PdfAdapter::new();
    let data = pdf_with_pages(&[None, None]);

    let text = adapter
        .extract_text(&data, &pdf_document(&data))
        .await
        .unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_pdf_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();
    let garbage = b"not a pdf at all";

    let result = adapter.extract_text(garbage, &pdf_document(garbage)).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_content_type_when_extracting_then_returns_unsupported() {
    let adapter = PdfAdapter::with_timeout(Duration::from_secs(5));
    let data = b"PK\x03\x04";
    let document = Document::new("notes.docx".to_string(), ContentType::Docx, 4);

    let result = adapter.extract_text(data, &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[test]
fn given_default_timeout_when_inspected_then_is_thirty_seconds() {
    assert_eq!(DEFAULT_EXTRACTION_TIMEOUT, Duration::from_secs(30));
}

#[test]
fn given_page_results_when_collecting_then_skips_blank_pages_and_trims_text() {
    let pages: Vec<Result<String, String>> = vec![
        Ok("  Alpha \n".to_string()),
        Ok(" \n\t".to_string()),
        Ok("Delta".to_string()),
    ];

    let texts = page_texts(pages).unwrap();

    assert_eq!(texts, vec!["Alpha", "Delta"]);
}

#[test]
fn given_page_that_fails_to_extract_when_collecting_then_whole_document_fails() {
    let pages: Vec<Result<String, String>> = vec![
        Ok("Alpha".to_string()),
        Err("broken content stream".to_string()),
        Ok("Delta".to_string()),
    ];

    let result = page_texts(pages);

    assert!(matches!(
        result,
        Err(FileLoaderError::ExtractionFailed(message)) if message.contains("page 2")
    ));
}
