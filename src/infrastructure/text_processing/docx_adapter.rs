use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read DOCX as ZIP: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("{DOCUMENT_PART} not found: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }
}

/// Text of each paragraph that sits directly in the document body, in order.
///
/// Paragraphs inside tables, text boxes or content controls are not part of
/// the body sequence and are left out. Run text is concatenated, `w:tab`
/// becomes a tab and `w:cr` or a text-wrapping `w:br` a line break. Page and
/// column breaks add nothing.
pub fn body_paragraphs(xml: &str) -> Result<Vec<String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Depth of the open body-level paragraph, so nested text boxes can be skipped.
    let mut paragraph_depth = 0;

    loop {
        let event = reader.read_event().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!(
                "malformed {DOCUMENT_PART} at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && path.last().is_some_and(|parent| parent == b"body") {
                    current = Some(String::new());
                    paragraph_depth = path.len() + 1;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let in_run = path.last().is_some_and(|name| name == b"r");
                if let Some(text) = current
                    .as_mut()
                    .filter(|_| in_run && !inside_text_box(&path))
                {
                    match e.local_name().as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" if is_line_break(&e) => text.push('\n'),
                        b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
                if e.local_name().as_ref() == b"p"
                    && path.last().is_some_and(|parent| parent == b"body")
                {
                    paragraphs.push(String::new());
                }
            }
            Event::Text(t) => {
                let in_run_text = path.last().is_some_and(|name| name == b"t");
                if let Some(text) = current
                    .as_mut()
                    .filter(|_| in_run_text && !inside_text_box(&path))
                {
                    let unescaped = t.unescape().map_err(|e| {
                        FileLoaderError::ExtractionFailed(format!(
                            "invalid text in {DOCUMENT_PART}: {e}"
                        ))
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(_) => {
                if current.is_some() && path.len() == paragraph_depth {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                    paragraph_depth = 0;
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn is_line_break(element: &BytesStart) -> bool {
    !element.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"type"
            && matches!(attr.value.as_ref(), b"page" | b"column")
    })
}

fn inside_text_box(path: &[Vec<u8>]) -> bool {
    path.iter().any(|name| name == b"txbxContent")
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let xml = Self::read_document_part(data)?;
        let paragraphs = body_paragraphs(&xml)?;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(paragraphs.join("\n"))
    }
}
