use dioxus::prelude::*;
use services::{FlowError, SurveyError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    Incomplete,
    Storage,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "問題が発生しました。もう一度お試しください。",
            ViewError::Incomplete => "すべての質問に回答してから提出してください。",
            ViewError::Storage => "結果を保存できませんでした。もう一度お試しください。",
        }
    }
}

impl From<&FlowError> for ViewError {
    fn from(err: &FlowError) -> Self {
        match err {
            FlowError::Incomplete { .. } => ViewError::Incomplete,
            _ => ViewError::Unknown,
        }
    }
}

impl From<SurveyError> for ViewError {
    fn from(err: SurveyError) -> Self {
        match &err {
            SurveyError::Flow(flow) => ViewError::from(flow),
            SurveyError::Storage(_) => ViewError::Storage,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
