use async_trait::async_trait;

use super::ModelError;

/// Text-to-text pipeline. The input already carries its instruction prefix.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String, ModelError>;
}
