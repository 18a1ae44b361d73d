#![forbid(unsafe_code)]

pub mod error;
pub mod survey;

pub use survey_core::Clock;

pub use error::{FlowError, SurveyError};
pub use survey::{
    FlowProgress, Phase, ResultsOverview, ResultsService, SurveyFlow, SurveyLoopService,
    TimeSeriesRow, Transition,
};
