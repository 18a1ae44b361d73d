use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use survey_core::model::{
    AnswerSet, CategoryResult, Likert, Question, SessionHistory, SubmissionId,
};
use survey_core::questionnaire::Questionnaire;
use survey_core::scoring::compute_category_scores;

use super::progress::FlowProgress;
use crate::error::FlowError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the respondent is in the survey.
///
/// `Intro -> Question(0) -> … -> Question(n - 1) -> Results`, and `Results -> Question(0)`
/// on retake. There is no way back to `Intro` once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Question(usize),
    Results(SubmissionId),
}

/// Hint for the view layer: whether the visible question changed.
///
/// The state is already updated when this is returned; views use it only to
/// trigger the fade between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { to: usize },
    Stayed,
}

impl Transition {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

//
// ─── FLOW ──────────────────────────────────────────────────────────────────────
//

/// Linear survey wizard for a single respondent.
///
/// Every operation is synchronous and either applies fully or returns a
/// `FlowError` leaving the state untouched.
#[derive(Clone)]
pub struct SurveyFlow {
    questionnaire: Arc<Questionnaire>,
    respondent: String,
    phase: Phase,
    answers: AnswerSet,
}

impl SurveyFlow {
    #[must_use]
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        let answers = AnswerSet::new(questionnaire.len());
        Self {
            questionnaire,
            respondent: String::new(),
            phase: Phase::Intro,
            answers,
        }
    }

    #[must_use]
    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    #[must_use]
    pub fn respondent(&self) -> &str {
        &self.respondent
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn show_results(&self) -> bool {
        matches!(self.phase, Phase::Results(_))
    }

    /// Index of the question on screen, if the flow is in a question state.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Question(index) => Some(index),
            Phase::Intro | Phase::Results(_) => None,
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index()
            .and_then(|index| self.questionnaire.question(index))
    }

    /// The answer already recorded for the question on screen.
    #[must_use]
    pub fn selected(&self) -> Option<Likert> {
        self.current_index().and_then(|index| self.answers.get(index))
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index()
            .is_some_and(|index| index + 1 == self.questionnaire.len())
    }

    #[must_use]
    pub fn progress(&self) -> FlowProgress {
        FlowProgress {
            total: self.questionnaire.len(),
            answered: self.answers.answered_count(),
            position: self.current_index().map(|index| index + 1),
        }
    }

    /// Leave the intro screen. The name is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::BlankName` for an empty or whitespace-only name and
    /// `FlowError::AlreadyStarted` outside the intro screen.
    pub fn start(&mut self, name: &str) -> Result<Transition, FlowError> {
        if self.phase != Phase::Intro {
            return Err(FlowError::AlreadyStarted);
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FlowError::BlankName);
        }

        self.respondent = trimmed.to_owned();
        self.phase = Phase::Question(0);
        debug!(respondent = %self.respondent, "survey started");
        Ok(Transition::Moved { to: 0 })
    }

    /// Record `value` for the question on screen and move forward unless it is the last one.
    ///
    /// `question_index` must match the question on screen, which keeps answers from
    /// landing ahead of the respondent.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotStarted`, `FlowError::ShowingResults`, or
    /// `FlowError::OutOfSequence` when the answer does not belong to the current question.
    pub fn answer(&mut self, question_index: usize, value: Likert) -> Result<Transition, FlowError> {
        let current = self.require_question()?;
        if question_index != current {
            return Err(FlowError::OutOfSequence {
                expected: current,
                got: question_index,
            });
        }

        self.answers.set(current, value);
        debug!(question = current + 1, value = value.value(), "answer recorded");

        if current + 1 < self.questionnaire.len() {
            self.phase = Phase::Question(current + 1);
            Ok(Transition::Moved { to: current + 1 })
        } else {
            Ok(Transition::Stayed)
        }
    }

    /// Step back one question. A no-op on the first question and outside question states.
    pub fn back(&mut self) -> Transition {
        match self.phase {
            Phase::Question(index) if index > 0 => {
                self.phase = Phase::Question(index - 1);
                Transition::Moved { to: index - 1 }
            }
            _ => Transition::Stayed,
        }
    }

    /// True when the respondent is on the last question and every slot is filled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_last_question() && self.answers.is_complete()
    }

    /// Validate submission preconditions and compute category scores without changing state.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotOnLastQuestion`, `FlowError::Incomplete`, or a scoring error.
    pub fn pending_results(&self) -> Result<Vec<CategoryResult>, FlowError> {
        self.require_question()?;
        if !self.is_last_question() {
            return Err(FlowError::NotOnLastQuestion);
        }
        if !self.answers.is_complete() {
            return Err(FlowError::Incomplete {
                missing: self.answers.missing(),
            });
        }
        Ok(compute_category_scores(
            &self.answers,
            self.questionnaire.categories(),
        )?)
    }

    /// Submit into an in-process history and switch to the results screen.
    ///
    /// # Errors
    ///
    /// Same as [`SurveyFlow::pending_results`].
    pub fn submit(
        &mut self,
        history: &mut SessionHistory,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionId, FlowError> {
        let results = self.pending_results()?;
        let id = history.append(results, submitted_at).id();
        self.complete(id);
        Ok(id)
    }

    pub(crate) fn complete(&mut self, id: SubmissionId) {
        self.phase = Phase::Results(id);
        debug!(submission = %id, "showing results");
    }

    /// Clear every answer and return to the first question. History is not touched.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotShowingResults` unless the results screen is active.
    pub fn retake(&mut self) -> Result<Transition, FlowError> {
        if !self.show_results() {
            return Err(FlowError::NotShowingResults);
        }
        self.answers.clear();
        self.phase = Phase::Question(0);
        debug!("survey retake");
        Ok(Transition::Moved { to: 0 })
    }

    fn require_question(&self) -> Result<usize, FlowError> {
        match self.phase {
            Phase::Question(index) => Ok(index),
            Phase::Intro => Err(FlowError::NotStarted),
            Phase::Results(_) => Err(FlowError::ShowingResults),
        }
    }
}

impl fmt::Debug for SurveyFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyFlow")
            .field("questions", &self.questionnaire.len())
            .field("respondent", &self.respondent)
            .field("phase", &self.phase)
            .field("answered", &self.answers.answered_count())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::questionnaire::Preset;
    use survey_core::time::fixed_now;

    fn standard() -> SurveyFlow {
        SurveyFlow::new(Arc::new(Questionnaire::preset(Preset::Standard).unwrap()))
    }

    fn likert(v: u8) -> Likert {
        Likert::new(v).unwrap()
    }

    fn answer_all(flow: &mut SurveyFlow, values: &[u8]) {
        for (index, &value) in values.iter().enumerate() {
            flow.answer(index, likert(value)).unwrap();
        }
    }

    #[test]
    fn start_requires_non_blank_name() {
        let mut flow = standard();
        assert_eq!(flow.start(""), Err(FlowError::BlankName));
        assert_eq!(flow.start("   "), Err(FlowError::BlankName));
        assert_eq!(flow.phase(), Phase::Intro);

        flow.start(" Alice ").unwrap();
        assert_eq!(flow.phase(), Phase::Question(0));
        assert_eq!(flow.respondent(), "Alice");
        assert_eq!(flow.start("Bob"), Err(FlowError::AlreadyStarted));
    }

    #[test]
    fn answering_before_start_is_rejected() {
        let mut flow = standard();
        assert_eq!(flow.answer(0, likert(3)), Err(FlowError::NotStarted));
        assert_eq!(flow.answers().answered_count(), 0);
    }

    #[test]
    fn answer_advances_until_last_question() {
        let mut flow = standard();
        flow.start("Alice").unwrap();

        let t = flow.answer(0, likert(4)).unwrap();
        assert_eq!(t, Transition::Moved { to: 1 });
        assert_eq!(flow.current_index(), Some(1));

        for index in 1..12 {
            flow.answer(index, likert(3)).unwrap();
        }
        assert_eq!(flow.current_index(), Some(12));
        assert!(flow.is_last_question());

        let t = flow.answer(12, likert(5)).unwrap();
        assert_eq!(t, Transition::Stayed);
        assert_eq!(flow.current_index(), Some(12));
        assert!(flow.can_submit());
    }

    #[test]
    fn cannot_answer_ahead_of_current_question() {
        let mut flow = standard();
        flow.start("Alice").unwrap();
        let err = flow.answer(3, likert(5)).unwrap_err();
        assert_eq!(err, FlowError::OutOfSequence { expected: 0, got: 3 });
        assert_eq!(flow.answers().get(3), None);
    }

    #[test]
    fn back_is_noop_on_first_question() {
        let mut flow = standard();
        assert_eq!(flow.back(), Transition::Stayed);
        flow.start("Alice").unwrap();
        assert_eq!(flow.back(), Transition::Stayed);
        assert_eq!(flow.current_index(), Some(0));

        flow.answer(0, likert(2)).unwrap();
        assert_eq!(flow.back(), Transition::Moved { to: 0 });
        assert_eq!(flow.selected(), Some(likert(2)));
    }

    #[test]
    fn submit_requires_last_question_and_all_answers() {
        let mut flow = standard();
        let mut history = SessionHistory::new();
        flow.start("Alice").unwrap();
        assert_eq!(
            flow.submit(&mut history, fixed_now()),
            Err(FlowError::NotOnLastQuestion)
        );

        answer_all(&mut flow, &[5; 12]);
        assert_eq!(
            flow.submit(&mut history, fixed_now()),
            Err(FlowError::Incomplete {
                missing: vec![survey_core::model::QuestionId::new(13).unwrap()]
            })
        );

        flow.answer(12, likert(5)).unwrap();
        flow.back();
        assert_eq!(
            flow.submit(&mut history, fixed_now()),
            Err(FlowError::NotOnLastQuestion)
        );
        assert!(history.is_empty());
    }

    #[test]
    fn submit_appends_record_and_shows_results() {
        let mut flow = standard();
        let mut history = SessionHistory::new();
        flow.start("Alice").unwrap();
        answer_all(&mut flow, &[5, 5, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5]);

        let id = flow.submit(&mut history, fixed_now()).unwrap();
        assert_eq!(id, SubmissionId::new(1));
        assert!(flow.show_results());
        assert_eq!(flow.phase(), Phase::Results(id));

        let scores: Vec<f64> = history.latest().unwrap().results().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![5.0, 4.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn retake_keeps_history_and_resets_answers() {
        let mut flow = standard();
        let mut history = SessionHistory::new();
        flow.start("Alice").unwrap();
        assert_eq!(flow.retake(), Err(FlowError::NotShowingResults));

        answer_all(&mut flow, &[5; 13]);
        flow.submit(&mut history, fixed_now()).unwrap();
        let first = history.latest().unwrap().clone();

        flow.retake().unwrap();
        assert_eq!(flow.phase(), Phase::Question(0));
        assert_eq!(flow.answers().answered_count(), 0);
        assert_eq!(flow.respondent(), "Alice");

        answer_all(&mut flow, &[1; 13]);
        let id = flow.submit(&mut history, fixed_now()).unwrap();
        assert_eq!(id, SubmissionId::new(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0], first);
    }

    #[test]
    fn answering_on_results_screen_is_rejected() {
        let mut flow = standard();
        let mut history = SessionHistory::new();
        flow.start("Alice").unwrap();
        answer_all(&mut flow, &[3; 13]);
        flow.submit(&mut history, fixed_now()).unwrap();

        assert_eq!(flow.answer(12, likert(1)), Err(FlowError::ShowingResults));
        assert_eq!(flow.back(), Transition::Stayed);
        assert_eq!(
            flow.submit(&mut history, fixed_now()),
            Err(FlowError::ShowingResults)
        );
    }

    #[test]
    fn progress_reports_position_and_answered() {
        let mut flow = standard();
        assert_eq!(flow.progress().position, None);
        flow.start("Alice").unwrap();
        flow.answer(0, likert(4)).unwrap();
        let progress = flow.progress();
        assert_eq!(progress.total, 13);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.position, Some(2));
    }
}
