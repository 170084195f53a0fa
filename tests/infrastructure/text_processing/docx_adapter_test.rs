use docassist::application::ports::{FileLoader, FileLoaderError};
use docassist::domain::{ContentType, Document};
use docassist::infrastructure::text_processing::{DocxAdapter, body_paragraphs};

use crate::helpers::fixtures::{
    document_xml, docx_with_body, docx_with_paragraphs, paragraph, zip_parts,
};

fn docx_document(data: &[u8]) -> Document {
    Document::new("notes.docx".to_string(), ContentType::Docx, data.len() as u64)
}

async fn extract(data: &[u8]) -> Result<String, FileLoaderError> {
    DocxAdapter::new().extract_text(data, &docx_document(data)).await
}

#[tokio::test]
async fn given_paragraphs_with_empty_one_when_extracting_then_keeps_every_paragraph() {
    let data = docx_with_paragraphs(&["First", "", "Third", ""]);

    let text = extract(&data).await.unwrap();

    assert_eq!(text, "First\n\nThird\n");
    assert_eq!(text.split('\n').count(), 4);
}

#[tokio::test]
async fn given_open_close_empty_paragraph_when_extracting_then_counts_it() {
    let body = format!("{}<w:p></w:p>{}", paragraph("A"), paragraph("B"));
    let data = docx_with_body(&body);

    let text = extract(&data).await.unwrap();

    assert_eq!(text, "A\n\nB");
}

#[tokio::test]
async fn given_table_between_paragraphs_when_extracting_then_table_text_is_left_out() {
    let body = format!(
        "{}<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>{}",
        paragraph("Before"),
        paragraph("After")
    );
    let data = docx_with_body(&body);

    let text = extract(&data).await.unwrap();

    assert_eq!(text, "Before\nAfter");
}

#[tokio::test]
async fn given_document_without_paragraphs_when_extracting_then_returns_empty_string() {
    let data = docx_with_body("");

    let text = extract(&data).await.unwrap();

    assert_eq!(text, "");
}

#[test]
fn given_multiple_runs_with_tab_and_break_when_parsing_then_concatenates_run_text() {
    let xml = document_xml(
        "<w:p><w:r><w:t>Name:</w:t><w:tab/><w:t>Ada</w:t></w:r>\
         <w:r><w:br/><w:t>Lovelace</w:t></w:r></w:p>",
    );

    let paragraphs = body_paragraphs(&xml).unwrap();

    assert_eq!(paragraphs, vec!["Name:\tAda\nLovelace"]);
}

#[test]
fn given_tab_stop_definitions_when_parsing_then_they_add_no_text() {
    let xml = document_xml(
        "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
         <w:r><w:t>Indented</w:t></w:r></w:p>",
    );

    let paragraphs = body_paragraphs(&xml).unwrap();

    assert_eq!(paragraphs, vec!["Indented"]);
}

#[test]
fn given_escaped_entities_when_parsing_then_unescapes_them() {
    let xml = document_xml(&paragraph("Fish &amp; chips &lt;3"));

    let paragraphs = body_paragraphs(&xml).unwrap();

    assert_eq!(paragraphs, vec!["Fish & chips <3"]);
}

#[test]
fn given_text_box_inside_paragraph_when_parsing_then_box_text_is_left_out() {
    let xml = document_xml(
        "<w:p><w:r><w:t>Body</w:t></w:r><w:r><w:pict><v:shape><v:textbox>\
         <w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent>\
         </v:textbox></v:shape></w:pict></w:r></w:p>",
    );

    let paragraphs = body_paragraphs(&xml).unwrap();

    assert_eq!(paragraphs, vec!["Body"]);
}

#[test]
fn given_mismatched_tags_when_parsing_then_returns_extraction_failed() {
    let result = body_paragraphs("<w:document><w:body><w:p></w:body></w:document>");

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_docx_then_returns_extraction_failed() {
    let result = extract(b"not a zip archive").await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_zip_without_document_part_when_extracting_then_returns_extraction_failed() {
    let data = zip_parts(&[("word/styles.xml", "<w:styles/>")]);

    let result = extract(&data).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_pdf_content_type_when_extracting_then_returns_unsupported() {
    let data = b"%PDF-1.4";
    let document = Document::new("sample.pdf".to_string(), ContentType::Pdf, 8);

    let result = DocxAdapter::new().extract_text(data, &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(_))
    ));
}

#[test]
fn given_page_and_column_breaks_when_parsing_then_only_line_breaks_add_newlines() {
    let xml = document_xml(
        "<w:p><w:r><w:t>One</w:t><w:br w:type=\"page\"/><w:t>Two</w:t>\
         <w:br w:type=\"column\"/><w:t>Three</w:t>\
         <w:br w:type=\"textWrapping\"/><w:t>Four</w:t></w:r></w:p>",
    );

    let paragraphs = body_paragraphs(&xml).unwrap();

    assert_eq!(paragraphs, vec!["OneTwoThree\nFour"]);
}
