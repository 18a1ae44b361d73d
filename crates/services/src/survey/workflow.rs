use std::sync::Arc;

use storage::repository::HistoryRepository;
use survey_core::model::SubmissionRecord;
use survey_core::questionnaire::Questionnaire;
use tracing::info;

use super::flow::SurveyFlow;
use crate::Clock;
use crate::error::SurveyError;

/// Orchestrates survey submission against the history repository.
#[derive(Clone)]
pub struct SurveyLoopService {
    clock: Clock,
    questionnaire: Arc<Questionnaire>,
    history: Arc<dyn HistoryRepository>,
}

impl SurveyLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questionnaire: Arc<Questionnaire>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            clock,
            questionnaire,
            history,
        }
    }

    #[must_use]
    pub fn questionnaire(&self) -> Arc<Questionnaire> {
        Arc::clone(&self.questionnaire)
    }

    /// A fresh flow on the intro screen.
    #[must_use]
    pub fn new_flow(&self) -> SurveyFlow {
        SurveyFlow::new(Arc::clone(&self.questionnaire))
    }

    /// Score the flow's answers, append a submission and switch the flow to results.
    ///
    /// The flow is left on its last question if the append fails, so the call can be retried.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Flow` when the flow is not ready to submit and
    /// `SurveyError::Storage` when the history cannot be written.
    pub async fn submit(&self, flow: &mut SurveyFlow) -> Result<SubmissionRecord, SurveyError> {
        let results = flow.pending_results()?;
        let record = self
            .history
            .append_submission(results, self.clock.now())
            .await?;
        flow.complete(record.id());

        info!(
            submission = %record.id(),
            categories = record.results().len(),
            respondent = %flow.respondent(),
            "survey submitted"
        );
        Ok(record)
    }
}
