use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::ActionError;
use crate::domain::{Action, ActionRequest, ActionResult};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Deserialize)]
pub struct ActionPayload {
    pub action: Action,
    #[serde(default)]
    pub question: Option<String>,
    pub text: String,
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub action: Action,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl From<ActionResult> for ActionResponse {
    fn from(result: ActionResult) -> Self {
        let action = result.action();
        match result {
            ActionResult::Answer(answer) => Self {
                action,
                text: answer.text,
                score: Some(answer.score),
                start: Some(answer.start),
                end: Some(answer.end),
            },
            ActionResult::Summary(text) | ActionResult::Correction(text) => Self {
                action,
                text,
                score: None,
                start: None,
                end: None,
            },
        }
    }
}

/// Malformed bodies of any kind (bad JSON, wrong content type, unknown
/// action) are answered with 422.
#[tracing::instrument(skip(state, payload))]
pub async fn action_handler(
    State(state): State<AppState>,
    payload: Result<Json<ActionPayload>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected action payload");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    if let Some(question) = payload.question.as_deref() {
        tracing::debug!(
            action = %payload.action,
            question = %sanitize_prompt(question),
            "Processing action"
        );
    }

    let request = ActionRequest {
        action: payload.action,
        question: payload.question,
        text: payload.text,
    };

    match state.action_service.dispatch(&request).await {
        Ok(Some(result)) => (StatusCode::OK, Json(ActionResponse::from(result))).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e @ ActionError::ModelUnavailable(_)) => {
            tracing::error!(error = %e, "Model pipelines unavailable");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        Err(e @ ActionError::Inference(_)) => {
            tracing::error!(error = %e, "Action failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
