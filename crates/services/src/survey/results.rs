use std::sync::Arc;

use storage::repository::HistoryRepository;
use survey_core::model::{CategoryResult, SubmissionId, SubmissionRecord};
use survey_core::questionnaire::Questionnaire;
use survey_core::scoring::{ComparedScore, Horizon, combine_with_previous, split_by_horizon};

use crate::error::SurveyError;

/// Latest submission compared against the one before it, split by horizon.
///
/// Presentation-agnostic: scores stay numeric and the UI decides formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsOverview {
    pub current: SubmissionRecord,
    pub previous: Option<SubmissionRecord>,
    pub short_term: Vec<ComparedScore>,
    pub long_term: Vec<ComparedScore>,
}

impl ResultsOverview {
    #[must_use]
    pub fn horizon(&self, horizon: Horizon) -> &[ComparedScore] {
        match horizon {
            Horizon::ShortTerm => &self.short_term,
            Horizon::LongTerm => &self.long_term,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// One submission's scores for a single horizon, for time-series charts.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRow {
    pub id: SubmissionId,
    pub scores: Vec<CategoryResult>,
}

/// Read side of the session history, shaped for the results screen.
#[derive(Clone)]
pub struct ResultsService {
    history: Arc<dyn HistoryRepository>,
    horizon_boundary: usize,
}

impl ResultsService {
    #[must_use]
    pub fn new(history: Arc<dyn HistoryRepository>, horizon_boundary: usize) -> Self {
        Self {
            history,
            horizon_boundary,
        }
    }

    #[must_use]
    pub fn for_questionnaire(
        history: Arc<dyn HistoryRepository>,
        questionnaire: &Questionnaire,
    ) -> Self {
        Self::new(history, questionnaire.horizon_boundary())
    }

    #[must_use]
    pub fn horizon_boundary(&self) -> usize {
        self.horizon_boundary
    }

    /// Compare the latest submission with its predecessor. `None` before the first submission.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` on repository failures.
    pub async fn overview(&self) -> Result<Option<ResultsOverview>, SurveyError> {
        let pair = self.history.latest_pair().await?;
        let Some(current) = pair.latest else {
            return Ok(None);
        };
        let previous = pair.previous;

        let current_split = split_by_horizon(current.results(), self.horizon_boundary);
        let previous_split = previous
            .as_ref()
            .map(|record| split_by_horizon(record.results(), self.horizon_boundary));

        let short_term = combine_with_previous(
            current_split.short_term,
            previous_split.map(|split| split.short_term),
        );
        let long_term = combine_with_previous(
            current_split.long_term,
            previous_split.map(|split| split.long_term),
        );

        Ok(Some(ResultsOverview {
            current,
            previous,
            short_term,
            long_term,
        }))
    }

    /// Every submission's scores for one horizon, in submission order.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` on repository failures.
    pub async fn time_series(&self, horizon: Horizon) -> Result<Vec<TimeSeriesRow>, SurveyError> {
        let records = self.history.list_submissions().await?;
        Ok(records
            .iter()
            .map(|record| TimeSeriesRow {
                id: record.id(),
                scores: split_by_horizon(record.results(), self.horizon_boundary)
                    .get(horizon)
                    .to_vec(),
            })
            .collect())
    }

    /// All submissions in order.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Storage` on repository failures.
    pub async fn history(&self) -> Result<Vec<SubmissionRecord>, SurveyError> {
        Ok(self.history.list_submissions().await?)
    }
}
