use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnStatus {
    Pending,
    Answered,
    Failed,
}

impl TurnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStatus::Pending => "pending",
            TurnStatus::Answered => "answered",
            TurnStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One question and, once the backend has replied, its answer.
///
/// A turn is pending until exactly one of `answer` or `failure` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub answer: Option<String>,
    pub failure: Option<String>,
}

impl Turn {
    pub fn pending(question: String) -> Self {
        Self {
            question,
            answer: None,
            failure: None,
        }
    }

    pub fn status(&self) -> TurnStatus {
        match (&self.answer, &self.failure) {
            (Some(_), _) => TurnStatus::Answered,
            (None, Some(_)) => TurnStatus::Failed,
            (None, None) => TurnStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status() == TurnStatus::Pending
    }

    /// The answered pair, if this turn has one.
    pub fn exchange(&self) -> Option<Exchange> {
        self.answer.as_ref().map(|answer| Exchange {
            question: self.question.clone(),
            answer: answer.clone(),
        })
    }
}

/// A completed question/answer pair as sent to the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
