use std::sync::Arc;

use crate::application::ports::{ModelError, ModelHandles, ModelLoader};
use crate::presentation::config::ModelsSettings;

use super::candle_roberta_qa::CandleRobertaQa;
use super::candle_t5_generator::CandleT5Generator;

/// Builds the three local pipelines. Summarizer and grammar fixer get their
/// own T5 instances even when they point at the same checkpoint.
pub struct CandleModelLoader {
    settings: ModelsSettings,
}

impl CandleModelLoader {
    pub fn new(settings: ModelsSettings) -> Self {
        Self { settings }
    }
}

impl ModelLoader for CandleModelLoader {
    fn load(&self) -> Result<ModelHandles, ModelError> {
        let summarizer = CandleT5Generator::new(&self.settings.summarizer, "summarization")?;
        let question_answerer = CandleRobertaQa::new(&self.settings.qa)?;
        let grammar_fixer = CandleT5Generator::new(&self.settings.grammar, "grammar")?;

        Ok(ModelHandles {
            summarizer: Arc::new(summarizer),
            question_answerer: Arc::new(question_answerer),
            grammar_fixer: Arc::new(grammar_fixer),
        })
    }
}
