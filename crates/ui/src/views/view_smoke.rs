use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use services::Phase;
use storage::repository::{HistoryRepository, InMemoryRepository, LatestPair, StorageError};
use survey_core::model::{CategoryResult, Likert, SubmissionId, SubmissionRecord};
use survey_core::questionnaire::{ENGAGEMENT_GUIDE_TITLE, REFERENCE_LABEL, SURVEY_TITLE};
use tokio::sync::Notify;

use super::test_harness::{
    ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_history, test_settings,
};
use crate::context::UiSettings;
use crate::vm::SurveyIntent;

fn likert(value: u8) -> Likert {
    Likert::new(value).expect("likert")
}

fn answer_all(harness: &mut ViewHarness, values: &[u8]) {
    for value in values {
        harness.dispatch(SurveyIntent::Answer(likert(*value)));
    }
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_renders_intro() {
    let mut harness = setup_view_harness(ViewKind::Survey);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains(SURVEY_TITLE), "missing title in {html}");
    assert!(html.contains("お名前を入力してください"), "missing input in {html}");
    assert!(html.contains("開始"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_ignores_blank_name() {
    let mut harness = setup_view_harness(ViewKind::Survey);
    harness.rebuild();
    harness.dispatch(SurveyIntent::Start("   ".into()));
    let html = harness.render();
    assert!(html.contains("開始"), "left intro in {html}");
    assert!(!html.contains("質問 1"), "unexpected question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_moves_between_questions() {
    let mut harness = setup_view_harness(ViewKind::Survey);
    harness.rebuild();

    harness.dispatch(SurveyIntent::Start(" Alice ".into()));
    let html = harness.render();
    assert!(html.contains("質問 1"), "missing heading in {html}");
    assert!(html.contains("興味や関心をもって学んでいる。"), "missing prompt in {html}");
    assert!(html.contains("当てはまらない"), "missing options in {html}");
    assert!(!html.contains("survey-option--selected"), "unexpected selection in {html}");

    harness.dispatch(SurveyIntent::Answer(likert(4)));
    let html = harness.render();
    assert!(html.contains("質問 2"), "did not advance in {html}");

    harness.dispatch(SurveyIntent::Back);
    let html = harness.render();
    assert!(html.contains("質問 1"), "did not go back in {html}");
    assert!(html.contains("survey-option--selected"), "lost selection in {html}");

    let respondent = harness.with_survey_vm(|vm| vm.flow().respondent().to_string());
    assert_eq!(respondent, "Alice");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_submits_and_retakes() {
    let mut harness = setup_view_harness(ViewKind::Survey);
    harness.rebuild();

    harness.dispatch(SurveyIntent::Start("Alice".into()));
    answer_all(&mut harness, &[5, 5, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5]);
    let html = harness.render();
    assert!(html.contains("質問 13"), "not on last question in {html}");
    assert!(html.contains("提出する"), "missing submit in {html}");

    harness.dispatch(SurveyIntent::Submit);
    let html = harness.render();
    assert!(html.contains("Aliceさんの回答結果"), "missing results heading in {html}");
    assert!(html.contains("短期的な取り組み"), "missing tab in {html}");
    assert!(html.contains("感情的エンゲージメント"), "missing category in {html}");
    assert!(html.contains("時系列グラフ（短期的な取り組み）"), "missing series in {html}");
    assert!(html.contains(ENGAGEMENT_GUIDE_TITLE), "missing guide in {html}");
    assert!(html.contains(REFERENCE_LABEL), "missing reference in {html}");
    assert!(html.contains("もう一度測定する"), "missing retake in {html}");
    assert!(!html.contains("前回のスコア"), "unexpected previous column in {html}");

    let first = harness.history.list_submissions().await.expect("list");
    assert_eq!(first.len(), 1);

    harness.dispatch(SurveyIntent::Retake);
    let html = harness.render();
    assert!(html.contains("質問 1"), "retake did not restart in {html}");
    assert!(!html.contains("survey-option--selected"), "answers kept in {html}");

    answer_all(&mut harness, &[1; 13]);
    harness.dispatch(SurveyIntent::Submit);
    let html = harness.render();
    assert!(html.contains("前回のスコア"), "missing previous column in {html}");

    let all = harness.history.list_submissions().await.expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], first[0]);
    assert_eq!(all[1].id(), SubmissionId::new(2));
}

fn harness_with_transition(transition: Duration) -> ViewHarness {
    let settings = UiSettings {
        transition,
        ..test_settings()
    };
    setup_view_harness_with_history(
        ViewKind::Survey,
        Arc::new(InMemoryRepository::new()),
        settings,
    )
}

fn phase(harness: &ViewHarness) -> Phase {
    harness.with_survey_vm(|vm| vm.flow().phase())
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_locks_answers_while_fading() {
    let mut harness = harness_with_transition(Duration::from_secs(60));
    harness.rebuild();

    harness.dispatch(SurveyIntent::Start("Alice".into()));
    let html = harness.render();
    assert!(!html.contains("survey-question--fading"), "start should not fade in {html}");

    harness.dispatch(SurveyIntent::Answer(likert(4)));
    harness.dispatch(SurveyIntent::Answer(likert(5)));

    assert_eq!(phase(&harness), Phase::Question(1));
    let answers = harness.with_survey_vm(|vm| {
        let answers = vm.flow().answers();
        (answers.get(0), answers.get(1))
    });
    assert_eq!(answers, (Some(likert(4)), None));

    let html = harness.render();
    assert!(html.contains("質問 2"), "missing second question in {html}");
    assert!(html.contains("survey-question--fading"), "missing fade class in {html}");
    assert!(html.contains("disabled"), "options not disabled in {html}");

    // Going back is still possible mid-fade.
    harness.dispatch(SurveyIntent::Back);
    assert_eq!(phase(&harness), Phase::Question(0));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn survey_view_smoke_fade_ends_after_latest_transition() {
    let mut harness = harness_with_transition(Duration::from_millis(100));
    harness.rebuild();
    harness.dispatch(SurveyIntent::Start("Alice".into()));

    harness.dispatch(SurveyIntent::Answer(likert(4)));
    tokio::time::sleep(Duration::from_millis(60)).await;
    harness.settle();
    harness.dispatch(SurveyIntent::Back);

    // The first timer expires here but belongs to a superseded move.
    tokio::time::sleep(Duration::from_millis(60)).await;
    harness.settle();
    let html = harness.render();
    assert!(html.contains("survey-question--fading"), "fade ended early in {html}");
    harness.dispatch(SurveyIntent::Answer(likert(2)));
    assert_eq!(phase(&harness), Phase::Question(0));

    tokio::time::sleep(Duration::from_millis(60)).await;
    harness.settle();
    let html = harness.render();
    assert!(!html.contains("survey-question--fading"), "fade never ended in {html}");

    harness.dispatch(SurveyIntent::Answer(likert(2)));
    assert_eq!(phase(&harness), Phase::Question(1));
}

/// Holds every append until the test opens the gate.
struct GatedHistoryRepo {
    inner: InMemoryRepository,
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl HistoryRepository for GatedHistoryRepo {
    async fn append_submission(
        &self,
        results: Vec<CategoryResult>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionRecord, StorageError> {
        self.gate.notified().await;
        self.inner.append_submission(results, submitted_at).await
    }

    async fn get_submission(&self, id: SubmissionId) -> Result<SubmissionRecord, StorageError> {
        self.inner.get_submission(id).await
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        self.inner.list_submissions().await
    }

    async fn latest_pair(&self) -> Result<LatestPair, StorageError> {
        self.inner.latest_pair().await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_ignores_intents_while_submitting() {
    let gate = Arc::new(Notify::new());
    let history = Arc::new(GatedHistoryRepo {
        inner: InMemoryRepository::new(),
        gate: Arc::clone(&gate),
    });
    let mut harness = setup_view_harness_with_history(ViewKind::Survey, history, test_settings());
    harness.rebuild();

    harness.dispatch(SurveyIntent::Start("Alice".into()));
    answer_all(&mut harness, &[3; 13]);
    harness.dispatch(SurveyIntent::Submit);
    harness.dispatch(SurveyIntent::Back);

    assert_eq!(phase(&harness), Phase::Question(12));
    let html = harness.render();
    assert!(html.contains("質問 13"), "left last question in {html}");

    gate.notify_one();
    harness.settle();

    assert_eq!(phase(&harness), Phase::Results(SubmissionId::new(1)));
    let html = harness.render();
    assert!(html.contains("Aliceさんの回答結果"), "missing results in {html}");
    assert_eq!(harness.history.list_submissions().await.expect("list").len(), 1);
}

struct FailingHistoryRepo;

#[async_trait::async_trait]
impl HistoryRepository for FailingHistoryRepo {
    async fn append_submission(
        &self,
        _results: Vec<CategoryResult>,
        _submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionRecord, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_submission(&self, _id: SubmissionId) -> Result<SubmissionRecord, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn latest_pair(&self) -> Result<LatestPair, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_keeps_last_question_when_storage_fails() {
    let mut harness = setup_view_harness_with_history(
        ViewKind::Survey,
        Arc::new(FailingHistoryRepo),
        test_settings(),
    );
    harness.rebuild();

    harness.dispatch(SurveyIntent::Start("Alice".into()));
    answer_all(&mut harness, &[3; 13]);
    harness.dispatch(SurveyIntent::Submit);

    let html = harness.render();
    assert!(html.contains("結果を保存できませんでした"), "missing error in {html}");
    assert!(html.contains("質問 13"), "left last question in {html}");
    assert!(html.contains("提出する"), "submit not retryable in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn about_view_smoke_renders_guide_and_categories() {
    let mut harness = setup_view_harness(ViewKind::About);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains(ENGAGEMENT_GUIDE_TITLE), "missing guide in {html}");
    assert!(html.contains("①感情的エンゲージメント"), "missing dimension in {html}");
    assert!(html.contains("自己効力感(長期的)"), "missing category in {html}");
    assert!(html.contains("質問 10・質問 11"), "missing question list in {html}");
    assert!(html.contains(REFERENCE_LABEL), "missing reference in {html}");
}
