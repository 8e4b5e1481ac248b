//! Request and response bodies of the backend's JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::Exchange;

#[derive(Debug, Serialize)]
pub(crate) struct UpsertRequest<'a> {
    pub documents: Vec<DocumentPayload<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DocumentPayload<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteRequest {
    pub document_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub question: &'a str,
    pub history: Vec<HistoryTurn<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryTurn<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

impl<'a> From<&'a Exchange> for HistoryTurn<'a> {
    fn from(exchange: &'a Exchange) -> Self {
        Self {
            question: &exchange.question,
            answer: &exchange.answer,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
