mod flow;
mod progress;
mod results;
mod workflow;

// Public API of the survey subsystem.
pub use flow::{Phase, SurveyFlow, Transition};
pub use progress::FlowProgress;
pub use results::{ResultsOverview, ResultsService, TimeSeriesRow};
pub use workflow::SurveyLoopService;
