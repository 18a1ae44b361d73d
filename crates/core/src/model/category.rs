use serde::{Deserialize, Serialize};

use super::QuestionId;

/// A named group of questions whose answers are averaged into one score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    questions: Vec<QuestionId>,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, questions: Vec<QuestionId>) -> Self {
        Self {
            name: name.into(),
            questions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionId] {
        &self.questions
    }
}

/// Aggregated score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub name: String,
    pub score: f64,
}

impl CategoryResult {
    #[must_use]
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}
