mod action;
mod action_result;
mod document;

pub use action::{Action, ActionRequest, FIX_GRAMMAR_PREFIX, SUMMARIZE_PREFIX};
pub use action_result::{ActionResult, Answer};
pub use document::{ContentType, DOCX_MIME, Document, DocumentId, ExtractedDocument, PDF_MIME};
