use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::QuestionId;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LikertError {
    #[error("likert value must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// A single Likert-scale answer, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Likert(u8);

impl Likert {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    /// # Errors
    ///
    /// Returns `LikertError::OutOfRange` for values outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, LikertError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LikertError::OutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Likert {
    type Error = LikertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.0
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five fixed, labelled choices shown for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: &'static str,
    pub value: Likert,
}

/// Answer choices in display order (strongest agreement first).
pub const ANSWER_OPTIONS: [AnswerOption; 5] = [
    AnswerOption {
        label: "当てはまる",
        value: Likert(5),
    },
    AnswerOption {
        label: "まあ当てはまる",
        value: Likert(4),
    },
    AnswerOption {
        label: "どちらともいえない",
        value: Likert(3),
    },
    AnswerOption {
        label: "あまり当てはまらない",
        value: Likert(2),
    },
    AnswerOption {
        label: "当てはまらない",
        value: Likert(1),
    },
];

/// A prompt in the questionnaire. Immutable once the questionnaire is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likert_accepts_only_one_to_five() {
        assert_eq!(Likert::new(0), Err(LikertError::OutOfRange(0)));
        assert_eq!(Likert::new(6), Err(LikertError::OutOfRange(6)));
        for v in 1..=5 {
            assert_eq!(Likert::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn likert_deserializes_only_valid_values() {
        assert_eq!(serde_json::from_str::<Likert>("3").unwrap(), Likert::new(3).unwrap());
        assert!(serde_json::from_str::<Likert>("0").is_err());
        assert!(serde_json::from_str::<Likert>("6").is_err());
        assert_eq!(serde_json::to_string(&Likert::MAX).unwrap(), "5");
    }

    #[test]
    fn answer_options_descend_from_five() {
        let values: Vec<u8> = ANSWER_OPTIONS.iter().map(|o| o.value.value()).collect();
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }
}
