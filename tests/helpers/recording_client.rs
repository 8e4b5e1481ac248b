use std::collections::VecDeque;
use std::sync::Mutex;

use kb_chat::application::ports::{BackendError, KnowledgeBaseClient};
use kb_chat::domain::{Exchange, UploadedFile};

/// In-memory backend that records every call.
#[derive(Default)]
pub struct RecordingClient {
    pub asks: Mutex<Vec<(String, Vec<Exchange>)>>,
    pub documents: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<UploadedFile>>,
    answers: Mutex<VecDeque<Result<String, BackendError>>>,
    failure: Mutex<Option<BackendError>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next `ask`. Without a queued outcome the
    /// client answers `"answer to <question>"`.
    pub fn push_answer(&self, outcome: Result<String, BackendError>) {
        self.answers.lock().unwrap().push_back(outcome);
    }

    /// Makes every document operation fail with `message`.
    pub fn fail_documents(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(BackendError::new(message));
    }

    pub fn asks(&self) -> Vec<(String, Vec<Exchange>)> {
        self.asks.lock().unwrap().clone()
    }

    pub fn documents(&self) -> Vec<String> {
        self.documents.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), BackendError> {
        match self.failure.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl KnowledgeBaseClient for RecordingClient {
    async fn create_document(&self, text: &str) -> Result<(), BackendError> {
        self.check_failure()?;
        self.documents.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn upload_document(&self, file: UploadedFile) -> Result<(), BackendError> {
        self.check_failure()?;
        self.uploads.lock().unwrap().push(file);
        Ok(())
    }

    async fn clear(&self) -> Result<(), BackendError> {
        self.check_failure()?;
        self.documents.lock().unwrap().clear();
        Ok(())
    }

    async fn ask(&self, question: &str, history: &[Exchange]) -> Result<String, BackendError> {
        self.asks
            .lock()
            .unwrap()
            .push((question.to_string(), history.to_vec()));

        let queued = self.answers.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(format!("answer to {}", question)))
    }
}
