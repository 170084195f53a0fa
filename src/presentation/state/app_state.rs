use std::sync::Arc;

use crate::application::services::{ActionService, DocumentService, ModelGateway};

#[derive(Clone)]
pub struct AppState {
    pub document_service: Arc<DocumentService>,
    pub action_service: Arc<ActionService>,
    pub model_gateway: Arc<ModelGateway>,
    pub max_upload_bytes: usize,
}
