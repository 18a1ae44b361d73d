use std::sync::Arc;
use std::time::Duration;

use services::{ResultsService, SurveyLoopService};

use crate::platform::LinkOpenerRef;
use crate::vm::ChartKind;

/// Presentation knobs resolved by the composition root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiSettings {
    /// Snapshot chart shown first on the results screen.
    pub chart: ChartKind,
    /// Fade between questions. Zero disables it.
    pub transition: Duration,
    /// Per-line lift in the time-series chart.
    pub series_offset: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            chart: ChartKind::Radar,
            transition: Duration::from_millis(300),
            series_offset: 0.05,
        }
    }
}

pub trait UiApp: Send + Sync {
    fn survey_loop(&self) -> Arc<SurveyLoopService>;
    fn results(&self) -> Arc<ResultsService>;
    fn settings(&self) -> UiSettings;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    survey_loop: Arc<SurveyLoopService>,
    results: Arc<ResultsService>,
    settings: UiSettings,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            survey_loop: app.survey_loop(),
            results: app.results(),
            settings: app.settings(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn settings(&self) -> UiSettings {
        self.settings
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
