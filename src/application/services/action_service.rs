use std::sync::Arc;

use crate::application::ports::{ModelError, ModelHandles};
use crate::domain::{Action, ActionRequest, ActionResult};

use super::model_gateway::ModelGateway;
use super::truncator::truncate;

/// Per-action character budgets applied to the document text before it
/// reaches a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBudgets {
    pub summarize_max_chars: usize,
    pub ask_max_chars: usize,
    pub grammar_max_chars: usize,
}

impl ActionBudgets {
    pub fn for_action(&self, action: Action) -> usize {
        match action {
            Action::Summarize => self.summarize_max_chars,
            Action::Ask => self.ask_max_chars,
            Action::FixGrammar => self.grammar_max_chars,
        }
    }
}

impl Default for ActionBudgets {
    fn default() -> Self {
        Self {
            summarize_max_chars: 2000,
            ask_max_chars: 2000,
            grammar_max_chars: 512,
        }
    }
}

pub struct ActionService {
    gateway: Arc<ModelGateway>,
    budgets: ActionBudgets,
}

impl ActionService {
    pub fn new(gateway: Arc<ModelGateway>, budgets: ActionBudgets) -> Self {
        Self { gateway, budgets }
    }

    /// Runs one action against the shared pipelines.
    ///
    /// Returns `Ok(None)` when there is nothing to do: an Ask without a
    /// question makes no model call and produces no output.
    #[tracing::instrument(
        skip(self, request),
        fields(action = %request.action, text_chars = request.text.chars().count())
    )]
    pub async fn dispatch(
        &self,
        request: &ActionRequest,
    ) -> Result<Option<ActionResult>, ActionError> {
        let source = truncate(&request.text, self.budgets.for_action(request.action));

        let result = match request.action {
            Action::Summarize => {
                let handles = self.handles().await?;
                let summary = handles
                    .summarizer
                    .generate(&prefixed(Action::Summarize, source))
                    .await
                    .map_err(ActionError::Inference)?;
                ActionResult::Summary(summary)
            }
            Action::Ask => {
                let Some(question) = request.question() else {
                    tracing::debug!("Ask without a question, nothing to do");
                    return Ok(None);
                };

                let handles = self.handles().await?;
                let answer = handles
                    .question_answerer
                    .answer(question, source)
                    .await
                    .map_err(ActionError::Inference)?;
                ActionResult::Answer(answer)
            }
            Action::FixGrammar => {
                let handles = self.handles().await?;
                let corrected = handles
                    .grammar_fixer
                    .generate(&prefixed(Action::FixGrammar, source))
                    .await
                    .map_err(ActionError::Inference)?;
                ActionResult::Correction(corrected)
            }
        };

        tracing::info!(
            submitted_chars = source.chars().count(),
            output_chars = result.text().chars().count(),
            "Action completed"
        );

        Ok(Some(result))
    }

    async fn handles(&self) -> Result<Arc<ModelHandles>, ActionError> {
        self.gateway
            .load()
            .await
            .map_err(ActionError::ModelUnavailable)
    }
}

fn prefixed(action: Action, text: &str) -> String {
    let prefix = action.instruction_prefix().unwrap_or_default();
    let mut input = String::with_capacity(prefix.len() + text.len());
    input.push_str(prefix);
    input.push_str(text);
    input
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("models unavailable: {0}")]
    ModelUnavailable(ModelError),
    #[error("inference: {0}")]
    Inference(ModelError),
}
