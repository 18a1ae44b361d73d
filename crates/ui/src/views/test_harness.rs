use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, ResultsService, SurveyLoopService};
use storage::repository::{HistoryRepository, Storage};
use survey_core::questionnaire::{Preset, Questionnaire};
use survey_core::time::fixed_now;

use crate::context::{UiApp, UiSettings, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::survey::SurveyTestHandles;
use crate::views::{AboutView, SurveyView};
use crate::vm::{ChartKind, SurveyIntent, SurveyVm};

struct NoopLinkOpener;

impl UiLinkOpener for NoopLinkOpener {
    fn open_url(&self, _url: &str) {}
}

#[derive(Clone)]
struct TestApp {
    survey_loop: Arc<SurveyLoopService>,
    results: Arc<ResultsService>,
    settings: UiSettings,
}

impl UiApp for TestApp {
    fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    fn settings(&self) -> UiSettings {
        self.settings
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(NoopLinkOpener)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Survey,
    About,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    survey_handles: Option<SurveyTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.survey_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Survey => rsx! { SurveyView {} },
        ViewKind::About => rsx! { AboutView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub history: Arc<dyn HistoryRepository>,
    pub survey_handles: Option<SurveyTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.settle();
    }

    /// Runs queued tasks and renders until resources spawned by the last render have resolved.
    pub fn settle(&mut self) {
        for _ in 0..3 {
            drive_dom(&mut self.dom);
        }
    }

    pub fn dispatch(&mut self, intent: SurveyIntent) {
        let handles = self
            .survey_handles
            .as_ref()
            .expect("survey view harness");
        let dispatch = handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle();
    }

    pub fn with_survey_vm<T>(&self, read: impl FnOnce(&SurveyVm) -> T) -> T {
        let handles = self
            .survey_handles
            .as_ref()
            .expect("survey view harness");
        let vm = handles.vm();
        self.dom.in_runtime(|| read(&vm.peek()))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_settings() -> UiSettings {
    UiSettings {
        chart: ChartKind::Bar,
        transition: Duration::ZERO,
        series_offset: 0.0,
    }
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_history(view, Arc::clone(&storage.history), test_settings())
}

pub fn setup_view_harness_with_history(
    view: ViewKind,
    history: Arc<dyn HistoryRepository>,
    settings: UiSettings,
) -> ViewHarness {
    let questionnaire = Arc::new(Questionnaire::preset(Preset::Standard).expect("preset"));
    let survey_loop = Arc::new(SurveyLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::clone(&questionnaire),
        Arc::clone(&history),
    ));
    let results = Arc::new(ResultsService::for_questionnaire(
        Arc::clone(&history),
        &questionnaire,
    ));
    let survey_handles = match view {
        ViewKind::Survey => Some(SurveyTestHandles::default()),
        ViewKind::About => None,
    };

    let app = Arc::new(TestApp {
        survey_loop,
        results,
        settings,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            survey_handles: survey_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        history,
        survey_handles,
    }
}
