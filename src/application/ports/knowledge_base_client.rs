use async_trait::async_trait;

use crate::domain::{Exchange, UploadedFile};

/// Operations offered by the question-answering backend.
#[async_trait]
pub trait KnowledgeBaseClient: Send + Sync {
    async fn create_document(&self, text: &str) -> Result<(), BackendError>;

    async fn upload_document(&self, file: UploadedFile) -> Result<(), BackendError>;

    /// Removes every document from the knowledge base.
    async fn clear(&self) -> Result<(), BackendError>;

    async fn ask(&self, question: &str, history: &[Exchange]) -> Result<String, BackendError>;
}

/// A failed backend request, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
