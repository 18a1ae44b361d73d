//! Category aggregation and the comparison helpers used by the results screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerSet, Category, CategoryResult, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("category `{name}` references no questions")]
    EmptyCategory { name: String },

    #[error("category `{name}` references question {question} but only {len} answers exist")]
    QuestionOutOfRange {
        name: String,
        question: QuestionId,
        len: usize,
    },

    #[error("question {question} has not been answered")]
    Unanswered { question: QuestionId },
}

/// Rounds to two decimals, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of each category's answers, rounded to two decimals, in category order.
///
/// # Errors
///
/// Returns `ScoringError::EmptyCategory` for a category with no questions,
/// `ScoringError::QuestionOutOfRange` for an index past the answer set, and
/// `ScoringError::Unanswered` when a referenced slot is still empty.
pub fn compute_category_scores(
    answers: &AnswerSet,
    categories: &[Category],
) -> Result<Vec<CategoryResult>, ScoringError> {
    categories
        .iter()
        .map(|category| score_category(answers, category))
        .collect()
}

fn score_category(answers: &AnswerSet, category: &Category) -> Result<CategoryResult, ScoringError> {
    let questions = category.questions();
    if questions.is_empty() {
        return Err(ScoringError::EmptyCategory {
            name: category.name().to_owned(),
        });
    }

    let mut sum = 0_u32;
    for &question in questions {
        if question.index() >= answers.len() {
            return Err(ScoringError::QuestionOutOfRange {
                name: category.name().to_owned(),
                question,
                len: answers.len(),
            });
        }
        let value = answers
            .answer_for(question)
            .ok_or(ScoringError::Unanswered { question })?;
        sum += u32::from(value.value());
    }

    let mean = f64::from(sum) / questions.len() as f64;
    Ok(CategoryResult::new(category.name(), round2(mean)))
}

/// Categories partitioned for display: short-term prefix and long-term suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonSplit<'a> {
    pub short_term: &'a [CategoryResult],
    pub long_term: &'a [CategoryResult],
}

/// Which half of a `HorizonSplit` a view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Horizon {
    #[default]
    ShortTerm,
    LongTerm,
}

impl<'a> HorizonSplit<'a> {
    #[must_use]
    pub fn get(&self, horizon: Horizon) -> &'a [CategoryResult] {
        match horizon {
            Horizon::ShortTerm => self.short_term,
            Horizon::LongTerm => self.long_term,
        }
    }
}

/// Splits at `boundary`; a boundary past the end yields an empty long-term half.
#[must_use]
pub fn split_by_horizon(results: &[CategoryResult], boundary: usize) -> HorizonSplit<'_> {
    let (short_term, long_term) = results.split_at(boundary.min(results.len()));
    HorizonSplit {
        short_term,
        long_term,
    }
}

/// A current score paired with the score at the same position in the previous submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedScore {
    pub name: String,
    pub score: f64,
    pub previous_score: Option<f64>,
}

/// Zips `current` with `previous` by position, not by name.
///
/// Positions missing from `previous` get `None`.
#[must_use]
pub fn combine_with_previous(
    current: &[CategoryResult],
    previous: Option<&[CategoryResult]>,
) -> Vec<ComparedScore> {
    current
        .iter()
        .enumerate()
        .map(|(index, item)| ComparedScore {
            name: item.name.clone(),
            score: item.score,
            previous_score: previous.and_then(|prev| prev.get(index)).map(|p| p.score),
        })
        .collect()
}
