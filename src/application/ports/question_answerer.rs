use async_trait::async_trait;

use crate::domain::Answer;

use super::ModelError;

#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer, ModelError>;
}
