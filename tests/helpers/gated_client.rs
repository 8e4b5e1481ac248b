use std::sync::atomic::{AtomicUsize, Ordering};

use kb_chat::application::ports::{BackendError, KnowledgeBaseClient};
use kb_chat::domain::{Exchange, UploadedFile};
use tokio::sync::Notify;

/// Client whose `ask` blocks until the test releases it, so a backend call
/// can be held open while other requests run.
#[derive(Default)]
pub struct GatedClient {
    asks: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl GatedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ask_count(&self) -> usize {
        self.asks.load(Ordering::SeqCst)
    }

    /// Waits until an `ask` has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one blocked `ask` return.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait::async_trait]
impl KnowledgeBaseClient for GatedClient {
    async fn create_document(&self, _text: &str) -> Result<(), BackendError> {
        Ok(())
    }

    async fn upload_document(&self, _file: UploadedFile) -> Result<(), BackendError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn ask(&self, question: &str, _history: &[Exchange]) -> Result<String, BackendError> {
        self.asks.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(format!("answer to {question}"))
    }
}
