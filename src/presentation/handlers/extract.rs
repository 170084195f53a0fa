use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::FileLoaderError;
use crate::domain::ContentType;
use crate::presentation::state::AppState;

use super::error::error_response;

const GENERIC_MIME: &str = "application/octet-stream";

#[derive(Serialize)]
pub struct ExtractResponse {
    pub document_id: String,
    pub filename: String,
    pub content_type: String,
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn extract_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Extract request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {e}"),
            );
        }
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();
    let declared = field.content_type().unwrap_or(GENERIC_MIME).to_string();
    let declared_mime = resolve_mime(&declared, &filename);

    tracing::debug!(filename = %filename, content_type = %declared_mime, "Processing file upload");

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {e}"));
        }
    };

    match state
        .document_service
        .extract(&filename, &declared_mime, &data)
        .await
    {
        Ok(extracted) => (
            StatusCode::OK,
            Json(ExtractResponse {
                document_id: extracted.document.id.as_uuid().to_string(),
                filename: extracted.document.filename,
                content_type: extracted.document.content_type.as_mime().to_string(),
                text: extracted.text,
            }),
        )
            .into_response(),
        Err(FileLoaderError::UnsupportedContentType(mime)) => {
            tracing::warn!(content_type = %mime, "Unsupported content type");
            error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type: {mime}"),
            )
        }
        Err(e @ FileLoaderError::ExtractionFailed(_)) => {
            tracing::error!(error = %e, filename = %filename, "Text extraction failed");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
    }
}

/// Browsers and CLI clients sometimes send a generic type; fall back to the
/// file extension only then.
fn resolve_mime(declared: &str, filename: &str) -> String {
    if ContentType::from_mime(declared).is_none() && declared.starts_with(GENERIC_MIME) {
        if let Some(content_type) = ContentType::from_filename(filename) {
            return content_type.as_mime().to_string();
        }
    }
    declared.to_string()
}
