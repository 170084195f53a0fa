mod actions;
mod error;
mod extract;
mod health;

pub use actions::{ActionPayload, ActionResponse, action_handler};
pub use error::{ErrorResponse, error_response};
pub use extract::{ExtractResponse, extract_handler};
pub use health::{HealthResponse, health_handler};
