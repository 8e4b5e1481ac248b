use std::collections::BTreeSet;

use super::{Exchange, Turn, TurnIndex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    #[error("turn {0} does not exist")]
    TurnNotFound(TurnIndex),
    #[error("turn {0} is already resolved")]
    AlreadyResolved(TurnIndex),
    #[error("turn {0} is already being answered")]
    InFlight(TurnIndex),
}

/// Append-only sequence of turns for one conversation.
///
/// Turns are addressed by [`TurnIndex`] and are never removed. The only
/// mutation after appending is the single transition of a pending turn to
/// answered or failed. A pending turn is claimed before its question goes
/// to the backend, so at most one caller asks for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
    in_flight: BTreeSet<TurnIndex>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn get(&self, index: TurnIndex) -> Option<&Turn> {
        self.turns.get(index.as_usize())
    }

    /// The turn at `index`, provided it is still awaiting its answer.
    pub fn pending(&self, index: TurnIndex) -> Result<&Turn, TranscriptError> {
        let turn = self.get(index).ok_or(TranscriptError::TurnNotFound(index))?;

        if !turn.is_pending() {
            return Err(TranscriptError::AlreadyResolved(index));
        }

        Ok(turn)
    }

    pub fn is_in_flight(&self, index: TurnIndex) -> bool {
        self.in_flight.contains(&index)
    }

    /// Marks the pending turn at `index` as being answered and returns its
    /// question with the history to send alongside it.
    pub fn claim(&mut self, index: TurnIndex) -> Result<(String, Vec<Exchange>), TranscriptError> {
        let question = self.pending(index)?.question.clone();

        if !self.in_flight.insert(index) {
            return Err(TranscriptError::InFlight(index));
        }

        Ok((question, self.history_before(index)))
    }

    pub fn append_pending(&mut self, question: String) -> TurnIndex {
        self.turns.push(Turn::pending(question));
        TurnIndex::new(self.turns.len() - 1)
    }

    /// Answered turns strictly before `index`, in submission order.
    pub fn history_before(&self, index: TurnIndex) -> Vec<Exchange> {
        let end = index.as_usize().min(self.turns.len());
        self.turns[..end]
            .iter()
            .filter_map(Turn::exchange)
            .collect()
    }

    pub fn complete(&mut self, index: TurnIndex, answer: String) -> Result<(), TranscriptError> {
        let turn = self.pending_mut(index)?;
        turn.answer = Some(answer);
        self.in_flight.remove(&index);
        Ok(())
    }

    pub fn fail(&mut self, index: TurnIndex, message: String) -> Result<(), TranscriptError> {
        let turn = self.pending_mut(index)?;
        turn.failure = Some(message);
        self.in_flight.remove(&index);
        Ok(())
    }

    fn pending_mut(&mut self, index: TurnIndex) -> Result<&mut Turn, TranscriptError> {
        let turn = self
            .turns
            .get_mut(index.as_usize())
            .ok_or(TranscriptError::TurnNotFound(index))?;

        if !turn.is_pending() {
            return Err(TranscriptError::AlreadyResolved(index));
        }

        Ok(turn)
    }
}
