//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use survey_core::model::QuestionId;
use survey_core::questionnaire::QuestionnaireError;
use survey_core::scoring::ScoringError;

/// Rejected transitions of the survey flow. The flow state is unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("respondent name is blank")]
    BlankName,
    #[error("survey already started")]
    AlreadyStarted,
    #[error("survey has not been started")]
    NotStarted,
    #[error("results are being shown; retake to answer again")]
    ShowingResults,
    #[error("results are not being shown")]
    NotShowingResults,
    #[error("expected an answer for question index {expected}, got {got}")]
    OutOfSequence { expected: usize, got: usize },
    #[error("submission is only possible from the last question")]
    NotOnLastQuestion,
    #[error("{} question(s) still unanswered", missing.len())]
    Incomplete { missing: Vec<QuestionId> },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Errors emitted by the survey services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurveyError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
