use async_trait::async_trait;
use mime::Mime;
use reqwest::{Client, Response, StatusCode, multipart};

use super::wire::{
    ChatRequest, ChatResponse, DeleteRequest, DocumentPayload, ErrorEnvelope, HistoryTurn,
    UpsertRequest,
};
use crate::application::ports::{BackendError, KnowledgeBaseClient};
use crate::domain::{Exchange, UploadedFile};

/// [`KnowledgeBaseClient`] speaking the backend's HTTP API.
///
/// Any status other than `200 OK` is a failure; the user-facing message is
/// taken from the body's `error.message`.
pub struct HttpKnowledgeBaseClient {
    client: Client,
    base_url: String,
}

impl HttpKnowledgeBaseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Backend request failed to send");
            BackendError::new(format!("backend unreachable: {}", e))
        })?;

        if response.status() != StatusCode::OK {
            return Err(error_from_response(response).await);
        }

        Ok(response)
    }
}

#[async_trait]
impl KnowledgeBaseClient for HttpKnowledgeBaseClient {
    async fn create_document(&self, text: &str) -> Result<(), BackendError> {
        let body = UpsertRequest {
            documents: vec![DocumentPayload { text }],
        };

        tracing::debug!(endpoint = "/upsert", "Creating document");
        self.send(self.client.post(self.endpoint("/upsert")).json(&body))
            .await?;
        Ok(())
    }

    async fn upload_document(&self, file: UploadedFile) -> Result<(), BackendError> {
        let UploadedFile {
            file_name,
            content_type,
            data,
        } = file;

        let mime = content_type.and_then(|value| parse_content_type(&file_name, &value));
        let mut part = multipart::Part::bytes(data).file_name(file_name);
        if let Some(mime) = mime {
            part = part
                .mime_str(mime.as_ref())
                .map_err(|e| BackendError::new(format!("invalid content type {}: {}", mime, e)))?;
        }
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(endpoint = "/upload", "Uploading document");
        self.send(self.client.post(self.endpoint("/upload")).multipart(form))
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), BackendError> {
        let body = DeleteRequest {
            document_ids: Vec::new(),
        };

        tracing::debug!(endpoint = "/delete", "Clearing knowledge base");
        self.send(self.client.post(self.endpoint("/delete")).json(&body))
            .await?;
        Ok(())
    }

    async fn ask(&self, question: &str, history: &[Exchange]) -> Result<String, BackendError> {
        let body = ChatRequest {
            question,
            history: history.iter().map(HistoryTurn::from).collect(),
        };

        tracing::debug!(endpoint = "/chat", history_len = history.len(), "Asking question");
        let response = self
            .send(self.client.post(self.endpoint("/chat")).json(&body))
            .await?;

        let chat: ChatResponse = response.json().await.map_err(|e| {
            BackendError::new(format!("backend returned an invalid chat response: {}", e))
        })?;

        Ok(chat.answer)
    }
}

async fn error_from_response(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = error_from_body(status, &body);

    tracing::warn!(status = %status, message = %error.message, "Backend returned an error");
    error
}

/// Extracts `error.message` from an error body, falling back to a message
/// naming the status when the body does not have that shape.
pub fn error_from_body(status: StatusCode, body: &str) -> BackendError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => BackendError::new(envelope.error.message),
        Err(_) => BackendError::new(format!("backend request failed with status {}", status)),
    }
}

/// Parses the browser-supplied content type. An unparsable value is dropped
/// so the part goes out with reqwest's default content type.
fn parse_content_type(file_name: &str, value: &str) -> Option<Mime> {
    match value.parse::<Mime>() {
        Ok(mime) => Some(mime),
        Err(e) => {
            tracing::warn!(
                file_name = %file_name,
                content_type = %value,
                error = %e,
                "Ignoring unparsable upload content type"
            );
            None
        }
    }
}
