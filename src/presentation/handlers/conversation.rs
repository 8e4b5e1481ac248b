use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use super::transcript_view::TranscriptResponse;
use crate::application::ports::KnowledgeBaseClient;
use crate::domain::{SessionId, TurnIndex};
use crate::infrastructure::observability::sanitize_question;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SubmitTurnRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct SubmitTurnResponse {
    pub index: usize,
    pub transcript: TranscriptResponse,
}

#[derive(Serialize)]
pub struct ResolveTurnResponse {
    pub transcript: TranscriptResponse,
}

#[tracing::instrument(skip(state))]
pub async fn transcript_handler<C>(
    State(state): State<AppState<C>>,
    ApiPath(session_id): ApiPath<Uuid>,
) -> Result<Json<TranscriptResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let session_id = SessionId::from_uuid(session_id);
    let transcript = state.conversation_service.transcript(session_id).await?;

    Ok(Json(TranscriptResponse::new(session_id, &transcript)))
}

/// First stage of a chat turn: records the question as pending.
#[tracing::instrument(skip(state, request))]
pub async fn submit_turn_handler<C>(
    State(state): State<AppState<C>>,
    ApiPath(session_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SubmitTurnRequest>,
) -> Result<Json<SubmitTurnResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let session_id = SessionId::from_uuid(session_id);
    tracing::debug!(question = %sanitize_question(&request.question), "Question submitted");

    let (index, transcript) = state
        .conversation_service
        .submit(session_id, request.question)
        .await?;

    Ok(Json(SubmitTurnResponse {
        index: index.as_usize(),
        transcript: TranscriptResponse::new(session_id, &transcript),
    }))
}

/// Second stage of a chat turn: fetches the answer from the backend.
#[tracing::instrument(skip(state))]
pub async fn resolve_turn_handler<C>(
    State(state): State<AppState<C>>,
    ApiPath((session_id, index)): ApiPath<(Uuid, usize)>,
) -> Result<Json<ResolveTurnResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let session_id = SessionId::from_uuid(session_id);
    let transcript = state
        .conversation_service
        .resolve(session_id, TurnIndex::new(index))
        .await?;

    Ok(Json(ResolveTurnResponse {
        transcript: TranscriptResponse::new(session_id, &transcript),
    }))
}
