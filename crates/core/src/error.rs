use thiserror::Error;

use crate::model::LikertError;
use crate::questionnaire::QuestionnaireError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Likert(#[from] LikertError),
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
