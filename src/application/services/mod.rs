mod action_service;
mod document_service;
mod model_gateway;
mod truncator;

pub use action_service::{ActionBudgets, ActionError, ActionService};
pub use document_service::DocumentService;
pub use model_gateway::ModelGateway;
pub use truncator::truncate;
