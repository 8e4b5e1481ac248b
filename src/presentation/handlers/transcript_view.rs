use serde::Serialize;

use crate::domain::{SessionId, Transcript};

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub turns: Vec<TurnView>,
}

#[derive(Debug, Serialize)]
pub struct TurnView {
    pub index: usize,
    pub question: String,
    pub answer: Option<String>,
    pub failure: Option<String>,
    pub status: &'static str,
}

impl TranscriptResponse {
    pub fn new(session_id: SessionId, transcript: &Transcript) -> Self {
        let turns = transcript
            .turns()
            .iter()
            .enumerate()
            .map(|(index, turn)| TurnView {
                index,
                question: turn.question.clone(),
                answer: turn.answer.clone(),
                failure: turn.failure.clone(),
                status: turn.status().as_str(),
            })
            .collect();

        Self {
            session_id: session_id.to_string(),
            turns,
        }
    }
}
