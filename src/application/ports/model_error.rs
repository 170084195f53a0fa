#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model loading failed: {0}")]
    LoadFailed(String),
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
