use std::sync::Arc;

use crate::application::ports::{BackendError, KnowledgeBaseClient};
use crate::domain::UploadedFile;

pub const CREATED_STATUS: &str = "Created successfully!";
pub const UPLOADED_STATUS: &str = "Uploaded successfully!";
pub const CLEARED_STATUS: &str = "Cleared successfully!";

/// Document management actions, each reported as a status line.
pub struct KnowledgeBaseService<C>
where
    C: KnowledgeBaseClient,
{
    client: Arc<C>,
}

impl<C> KnowledgeBaseService<C>
where
    C: KnowledgeBaseClient,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn create(&self, text: &str) -> Result<&'static str, BackendError> {
        self.client.create_document(text).await?;
        tracing::info!(chars = text.chars().count(), "Document created");
        Ok(CREATED_STATUS)
    }

    pub async fn upload(&self, file: UploadedFile) -> Result<&'static str, BackendError> {
        let file_name = file.file_name.clone();
        let size_bytes = file.size_bytes();

        self.client.upload_document(file).await?;
        tracing::info!(file_name = %file_name, size_bytes, "Document uploaded");
        Ok(UPLOADED_STATUS)
    }

    pub async fn clear(&self) -> Result<&'static str, BackendError> {
        self.client.clear().await?;
        tracing::info!("Knowledge base cleared");
        Ok(CLEARED_STATUS)
    }
}
