use std::sync::Arc;

use crate::application::ports::{BackendError, KnowledgeBaseClient};
use crate::application::services::SessionStore;
use crate::domain::{SessionId, Transcript, TranscriptError, TurnIndex};

/// Drives the two-stage chat flow: a question is appended as a pending turn,
/// then resolved against the backend in a separate step.
pub struct ConversationService<C>
where
    C: KnowledgeBaseClient,
{
    client: Arc<C>,
    sessions: Arc<SessionStore>,
}

impl<C> ConversationService<C>
where
    C: KnowledgeBaseClient,
{
    pub fn new(client: Arc<C>, sessions: Arc<SessionStore>) -> Self {
        Self { client, sessions }
    }

    pub async fn start_session(&self) -> SessionId {
        let id = self.sessions.create().await;
        tracing::info!(session_id = %id, "Conversation session started");
        id
    }

    pub async fn transcript(&self, session_id: SessionId) -> Result<Transcript, ConversationError> {
        self.sessions
            .read(session_id, |session| session.transcript.clone())
            .await
            .ok_or(ConversationError::SessionNotFound(session_id))
    }

    /// Appends `question` as a pending turn and returns its index together
    /// with the transcript to render before the answer arrives.
    pub async fn submit(
        &self,
        session_id: SessionId,
        question: String,
    ) -> Result<(TurnIndex, Transcript), ConversationError> {
        if question.trim().is_empty() {
            return Err(ConversationError::EmptyQuestion);
        }

        self.sessions
            .update(session_id, |session| {
                let index = session.transcript.append_pending(question);
                (index, session.transcript.clone())
            })
            .await
            .ok_or(ConversationError::SessionNotFound(session_id))
    }

    /// Asks the backend for the pending turn at `index`, sending every
    /// answered turn before it as history, and records the outcome.
    ///
    /// The turn is claimed before the backend call, so a concurrent resolve
    /// of the same turn gets [`TranscriptError::InFlight`] instead of asking
    /// twice. A backend failure marks the turn failed and is returned as
    /// [`ConversationError::Backend`]; the turn is not retried.
    pub async fn resolve(
        &self,
        session_id: SessionId,
        index: TurnIndex,
    ) -> Result<Transcript, ConversationError> {
        let (question, history) = self
            .sessions
            .update(session_id, |session| session.transcript.claim(index))
            .await
            .ok_or(ConversationError::SessionNotFound(session_id))??;

        tracing::debug!(
            turn = %index,
            history_len = history.len(),
            "Asking backend"
        );

        let outcome = self.client.ask(&question, &history).await;

        let transcript = self
            .sessions
            .update(session_id, |session| -> Result<Transcript, TranscriptError> {
                match &outcome {
                    Ok(answer) => session.transcript.complete(index, answer.clone())?,
                    Err(e) => session.transcript.fail(index, e.message.clone())?,
                }
                Ok(session.transcript.clone())
            })
            .await
            .ok_or(ConversationError::SessionNotFound(session_id))??;

        match outcome {
            Ok(_) => {
                tracing::info!(turn = %index, "Turn answered");
                Ok(transcript)
            }
            Err(e) => {
                tracing::warn!(turn = %index, error = %e, "Turn failed");
                Err(ConversationError::Backend(e))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error(transparent)]
    Turn(#[from] TranscriptError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
