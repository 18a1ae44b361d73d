use services::{FlowError, Phase, SurveyFlow, SurveyLoopService, Transition};
use survey_core::model::{ANSWER_OPTIONS, Likert, SubmissionId};
use tracing::debug;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyIntent {
    Start(String),
    Answer(Likert),
    Back,
    Submit,
    Retake,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub label: &'static str,
    pub value: Likert,
    pub selected: bool,
}

/// The question card as shown on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub heading: String,
    pub prompt: String,
    pub options: Vec<AnswerOptionVm>,
    pub can_go_back: bool,
    pub can_submit: bool,
    pub progress_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyScreen {
    Intro { title: String },
    Question(QuestionVm),
    Results {
        respondent: String,
        submission: SubmissionId,
    },
}

/// View-side owner of the survey flow.
#[derive(Clone, Debug)]
pub struct SurveyVm {
    flow: SurveyFlow,
}

impl SurveyVm {
    #[must_use]
    pub fn new(flow: SurveyFlow) -> Self {
        Self { flow }
    }

    #[must_use]
    pub fn flow(&self) -> &SurveyFlow {
        &self.flow
    }

    #[must_use]
    pub fn screen(&self) -> SurveyScreen {
        match self.flow.phase() {
            Phase::Intro => SurveyScreen::Intro {
                title: self.flow.questionnaire().title().to_string(),
            },
            Phase::Question(index) => map_question(&self.flow, index),
            Phase::Results(submission) => SurveyScreen::Results {
                respondent: self.flow.respondent().to_string(),
                submission,
            },
        }
    }

    /// Applies a synchronous intent. `Submit` is async and goes through [`SurveyVm::submit`].
    ///
    /// Blocked actions (blank name, answering out of turn) leave the flow untouched and
    /// report `Transition::Stayed`; they are not errors for the view.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Incomplete` if answers are missing and `ViewError::Unknown` for
    /// anything the screen should never have offered.
    pub fn apply(&mut self, intent: &SurveyIntent) -> Result<Transition, ViewError> {
        let result = match intent {
            SurveyIntent::Start(name) => self.flow.start(name),
            SurveyIntent::Answer(value) => match self.flow.current_index() {
                Some(index) => self.flow.answer(index, *value),
                None => Ok(Transition::Stayed),
            },
            SurveyIntent::Back => Ok(self.flow.back()),
            SurveyIntent::Retake => self.flow.retake(),
            SurveyIntent::Submit => Ok(Transition::Stayed),
        };
        match result {
            Ok(transition) => Ok(transition),
            Err(
                err @ (FlowError::BlankName
                | FlowError::OutOfSequence { .. }
                | FlowError::NotOnLastQuestion),
            ) => {
                debug!(error = %err, "survey action blocked");
                Ok(Transition::Stayed)
            }
            Err(err) => Err(ViewError::from(&err)),
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Incomplete` when answers are missing and `ViewError::Storage`
    /// when the submission cannot be stored; the flow stays on its last question.
    pub async fn submit(
        &mut self,
        survey_loop: &SurveyLoopService,
    ) -> Result<SubmissionId, ViewError> {
        let record = survey_loop
            .submit(&mut self.flow)
            .await
            .map_err(ViewError::from)?;
        Ok(record.id())
    }
}

fn map_question(flow: &SurveyFlow, index: usize) -> SurveyScreen {
    let selected = flow.selected();
    let progress = flow.progress();
    let prompt = flow
        .current_question()
        .map(|question| question.text().to_string())
        .unwrap_or_default();
    SurveyScreen::Question(QuestionVm {
        index,
        heading: format!("質問 {}", index + 1),
        prompt,
        options: ANSWER_OPTIONS
            .iter()
            .map(|option| AnswerOptionVm {
                label: option.label,
                value: option.value,
                selected: selected == Some(option.value),
            })
            .collect(),
        can_go_back: index > 0,
        can_submit: flow.can_submit(),
        progress_label: format!("{} / {}", index + 1, progress.total),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use services::Clock;
    use storage::repository::InMemoryRepository;
    use survey_core::questionnaire::{Preset, Questionnaire};
    use survey_core::time::fixed_now;

    use super::*;

    fn service() -> SurveyLoopService {
        let questionnaire = Arc::new(Questionnaire::preset(Preset::Standard).expect("preset"));
        SurveyLoopService::new(
            Clock::fixed(fixed_now()),
            questionnaire,
            Arc::new(InMemoryRepository::new()),
        )
    }

    fn likert(value: u8) -> Likert {
        Likert::new(value).expect("likert")
    }

    fn question(vm: &SurveyVm) -> QuestionVm {
        match vm.screen() {
            SurveyScreen::Question(question) => question,
            other => panic!("expected question screen, got {other:?}"),
        }
    }

    #[test]
    fn blank_start_stays_on_intro() {
        let mut vm = SurveyVm::new(service().new_flow());
        let transition = vm.apply(&SurveyIntent::Start("   ".into())).expect("apply");
        assert_eq!(transition, Transition::Stayed);
        assert!(matches!(vm.screen(), SurveyScreen::Intro { .. }));
    }

    #[test]
    fn question_screen_tracks_selection_and_navigation() {
        let mut vm = SurveyVm::new(service().new_flow());
        vm.apply(&SurveyIntent::Start(" Alice ".into())).expect("start");

        let first = question(&vm);
        assert_eq!(first.heading, "質問 1");
        assert_eq!(first.progress_label, "1 / 13");
        assert!(!first.can_go_back);
        assert_eq!(first.options.len(), 5);
        assert!(first.options.iter().all(|option| !option.selected));

        let transition = vm.apply(&SurveyIntent::Answer(likert(4))).expect("answer");
        assert_eq!(transition, Transition::Moved { to: 1 });
        assert!(question(&vm).can_go_back);

        vm.apply(&SurveyIntent::Back).expect("back");
        let revisited = question(&vm);
        assert_eq!(revisited.index, 0);
        let selected: Vec<_> = revisited
            .options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label)
            .collect();
        assert_eq!(selected, ["まあ当てはまる"]);
    }

    #[tokio::test]
    async fn submit_then_retake_keeps_respondent() {
        let service = service();
        let mut vm = SurveyVm::new(service.new_flow());
        vm.apply(&SurveyIntent::Start("Alice".into())).expect("start");
        for _ in 0..13 {
            vm.apply(&SurveyIntent::Answer(likert(3))).expect("answer");
        }
        assert!(question(&vm).can_submit);

        let id = vm.submit(&service).await.expect("submit");
        assert_eq!(id, SubmissionId::new(1));
        assert_eq!(
            vm.screen(),
            SurveyScreen::Results {
                respondent: "Alice".into(),
                submission: id,
            }
        );

        vm.apply(&SurveyIntent::Retake).expect("retake");
        let restarted = question(&vm);
        assert_eq!(restarted.index, 0);
        assert!(!restarted.can_submit);
        assert_eq!(vm.flow().respondent(), "Alice");
    }

    #[tokio::test]
    async fn submit_with_missing_answers_is_incomplete() {
        let service = service();
        let mut vm = SurveyVm::new(service.new_flow());
        vm.apply(&SurveyIntent::Start("Alice".into())).expect("start");
        for _ in 0..12 {
            vm.apply(&SurveyIntent::Answer(likert(5))).expect("answer");
        }
        let last = question(&vm);
        assert_eq!(last.index, 12);
        assert!(!last.can_submit);

        let err = vm.submit(&service).await.expect_err("incomplete");
        assert_eq!(err, ViewError::Incomplete);
        assert!(matches!(vm.screen(), SurveyScreen::Question(_)));
    }
}
