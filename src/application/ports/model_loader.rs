use std::sync::Arc;

use super::{ModelError, QuestionAnswerer, TextGenerator};

/// The three pipelines the actions run against. Handles are never mutated
/// once built, only invoked.
#[derive(Clone)]
pub struct ModelHandles {
    pub summarizer: Arc<dyn TextGenerator>,
    pub question_answerer: Arc<dyn QuestionAnswerer>,
    pub grammar_fixer: Arc<dyn TextGenerator>,
}

/// Builds every pipeline in one go. Expected to block for a long time
/// (weight download and load), so callers run it off the async executor.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<ModelHandles, ModelError>;
}
