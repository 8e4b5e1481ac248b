use std::sync::Arc;
use std::time::Duration;

use kb_chat::application::ports::BackendError;
use kb_chat::application::services::{ConversationError, ConversationService, SessionStore};
use kb_chat::domain::{Exchange, SessionId, TranscriptError, TurnIndex, TurnStatus};

use crate::helpers::{GatedClient, RecordingClient};

const TEST_IDLE_TTL: Duration = Duration::from_secs(3600);

fn service() -> (ConversationService<RecordingClient>, Arc<RecordingClient>) {
    let client = Arc::new(RecordingClient::new());
    let sessions = Arc::new(SessionStore::new(TEST_IDLE_TTL));
    (
        ConversationService::new(Arc::clone(&client), sessions),
        client,
    )
}

#[tokio::test]
async fn given_empty_history_when_asking_then_transcript_shows_answered_turn() {
    let (service, client) = service();
    client.push_answer(Ok("4".to_string()));
    let session = service.start_session().await;

    let (index, pending) = service
        .submit(session, "What is 2+2?".to_string())
        .await
        .unwrap();
    let transcript = service.resolve(session, index).await.unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending.turns()[0].status(), TurnStatus::Pending);
    assert_eq!(client.asks(), vec![("What is 2+2?".to_string(), vec![])]);
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].question, "What is 2+2?");
    assert_eq!(transcript.turns()[0].answer.as_deref(), Some("4"));
}

#[tokio::test]
async fn given_two_answered_turns_when_submitting_then_history_contains_both_in_order() {
    let (service, client) = service();
    client.push_answer(Ok("a1".to_string()));
    client.push_answer(Ok("a2".to_string()));
    client.push_answer(Ok("A".to_string()));
    let session = service.start_session().await;

    for question in ["q1", "q2"] {
        let (index, _) = service.submit(session, question.to_string()).await.unwrap();
        service.resolve(session, index).await.unwrap();
    }
    let (index, _) = service.submit(session, "Q".to_string()).await.unwrap();
    let transcript = service.resolve(session, index).await.unwrap();

    let asks = client.asks();
    assert_eq!(asks.len(), 3);
    assert_eq!(asks[2].0, "Q");
    assert_eq!(
        asks[2].1,
        vec![Exchange::new("q1", "a1"), Exchange::new("q2", "a2")]
    );
    assert_eq!(transcript.turns()[0].answer.as_deref(), Some("a1"));
    assert_eq!(transcript.turns()[1].answer.as_deref(), Some("a2"));
    assert_eq!(transcript.turns()[2].answer.as_deref(), Some("A"));
}

#[tokio::test]
async fn given_overlapping_submissions_when_resolving_later_one_then_pending_turn_is_not_in_history() {
    let (service, client) = service();
    let session = service.start_session().await;

    let (first, _) = service.submit(session, "first".to_string()).await.unwrap();
    let (second, _) = service.submit(session, "second".to_string()).await.unwrap();
    service.resolve(session, second).await.unwrap();
    service.resolve(session, first).await.unwrap();

    let asks = client.asks();
    assert_eq!(asks[0], ("second".to_string(), vec![]));
    assert_eq!(asks[1], ("first".to_string(), vec![]));
}

#[tokio::test]
async fn given_backend_failure_when_resolving_then_turn_is_marked_failed() {
    let (service, client) = service();
    client.push_answer(Err(BackendError::new("model overloaded")));
    let session = service.start_session().await;

    let (index, _) = service.submit(session, "q".to_string()).await.unwrap();
    let result = service.resolve(session, index).await;

    assert!(matches!(
        result,
        Err(ConversationError::Backend(ref e)) if e.message == "model overloaded"
    ));
    let transcript = service.transcript(session).await.unwrap();
    let turn = transcript.get(index).unwrap();
    assert_eq!(turn.status(), TurnStatus::Failed);
    assert_eq!(turn.failure.as_deref(), Some("model overloaded"));
    assert_eq!(turn.answer, None);
}

#[tokio::test]
async fn given_failed_turn_when_asking_next_question_then_failed_turn_is_not_sent() {
    let (service, client) = service();
    client.push_answer(Err(BackendError::new("boom")));
    let session = service.start_session().await;

    let (failed, _) = service.submit(session, "broken".to_string()).await.unwrap();
    service.resolve(session, failed).await.unwrap_err();
    let (next, _) = service.submit(session, "again".to_string()).await.unwrap();
    service.resolve(session, next).await.unwrap();

    assert_eq!(client.asks()[1], ("again".to_string(), vec![]));
}

#[tokio::test]
async fn given_resolved_turn_when_resolving_again_then_returns_conflict_without_calling_backend() {
    let (service, client) = service();
    let session = service.start_session().await;
    let (index, _) = service.submit(session, "q".to_string()).await.unwrap();
    service.resolve(session, index).await.unwrap();

    let result = service.resolve(session, index).await;

    assert!(matches!(
        result,
        Err(ConversationError::Turn(TranscriptError::AlreadyResolved(_)))
    ));
    assert_eq!(client.asks().len(), 1);
}

#[tokio::test]
async fn given_unknown_turn_when_resolving_then_returns_turn_not_found() {
    let (service, _client) = service();
    let session = service.start_session().await;

    let result = service.resolve(session, TurnIndex::new(7)).await;

    assert!(matches!(
        result,
        Err(ConversationError::Turn(TranscriptError::TurnNotFound(_)))
    ));
}

#[tokio::test]
async fn given_unknown_session_when_submitting_then_returns_session_not_found() {
    let (service, _client) = service();

    let result = service.submit(SessionId::new(), "q".to_string()).await;

    assert!(matches!(result, Err(ConversationError::SessionNotFound(_))));
}

#[tokio::test]
async fn given_blank_question_when_submitting_then_transcript_is_unchanged() {
    let (service, _client) = service();
    let session = service.start_session().await;

    let result = service.submit(session, "   ".to_string()).await;

    assert!(matches!(result, Err(ConversationError::EmptyQuestion)));
    assert!(service.transcript(session).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_two_sessions_when_submitting_then_transcripts_are_independent() {
    let (service, _client) = service();
    let first = service.start_session().await;
    let second = service.start_session().await;

    service.submit(first, "only here".to_string()).await.unwrap();

    assert_eq!(service.transcript(first).await.unwrap().len(), 1);
    assert!(service.transcript(second).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_turn_being_answered_when_resolving_concurrently_then_backend_is_asked_once() {
    let client = Arc::new(GatedClient::new());
    let sessions = Arc::new(SessionStore::new(TEST_IDLE_TTL));
    let service = Arc::new(ConversationService::new(Arc::clone(&client), sessions));
    let session = service.start_session().await;
    let (index, _) = service.submit(session, "q".to_string()).await.unwrap();

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.resolve(session, index).await }
    });
    client.entered().await;

    let second = service.resolve(session, index).await;

    assert!(matches!(
        second,
        Err(ConversationError::Turn(TranscriptError::InFlight(i))) if i == index
    ));
    assert_eq!(client.ask_count(), 1);
    let pending = service.transcript(session).await.unwrap();
    assert_eq!(pending.turns()[0].status(), TurnStatus::Pending);

    client.release();
    let transcript = first.await.unwrap().unwrap();

    assert_eq!(transcript.turns()[0].answer.as_deref(), Some("answer to q"));
    assert!(!transcript.is_in_flight(index));
    assert_eq!(client.ask_count(), 1);
}
