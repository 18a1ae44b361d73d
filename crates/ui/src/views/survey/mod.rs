mod charts;
mod intro;
mod question;
mod results;
mod view;

pub use view::SurveyView;

#[cfg(test)]
pub(crate) use view::SurveyTestHandles;
