use services::{ResultsOverview, ResultsService, TimeSeriesRow};
use survey_core::questionnaire::Questionnaire;
use survey_core::scoring::{ComparedScore, Horizon, round2};

use crate::views::ViewError;

/// Score for display: at most two decimals, trailing zeros dropped (`4.50` shows as `4.5`).
#[must_use]
pub fn format_score(value: f64) -> String {
    let text = format!("{:.2}", round2(value));
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRowVm {
    pub name: String,
    pub score: String,
    pub previous: Option<String>,
}

/// Everything shown under one horizon tab.
#[derive(Clone, Debug, PartialEq)]
pub struct HorizonVm {
    pub horizon: Horizon,
    pub label: String,
    pub series_title: String,
    pub scores: Vec<ComparedScore>,
    pub rows: Vec<ScoreRowVm>,
    pub time_series: Vec<TimeSeriesRow>,
}

impl HorizonVm {
    fn new(
        horizon: Horizon,
        label: &str,
        scores: &[ComparedScore],
        time_series: Vec<TimeSeriesRow>,
    ) -> Self {
        let rows = scores
            .iter()
            .map(|item| ScoreRowVm {
                name: item.name.clone(),
                score: format_score(item.score),
                previous: item.previous_score.map(format_score),
            })
            .collect();
        Self {
            horizon,
            label: label.to_owned(),
            series_title: format!("時系列グラフ（{label}）"),
            scores: scores.to_vec(),
            rows,
            time_series,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub heading: String,
    pub has_previous: bool,
    pub submission_count: usize,
    pub short_term: HorizonVm,
    pub long_term: HorizonVm,
}

impl ResultsVm {
    #[must_use]
    pub fn horizon(&self, horizon: Horizon) -> &HorizonVm {
        match horizon {
            Horizon::ShortTerm => &self.short_term,
            Horizon::LongTerm => &self.long_term,
        }
    }
}

#[must_use]
pub fn map_results(
    questionnaire: &Questionnaire,
    respondent: &str,
    overview: &ResultsOverview,
    short_term_series: Vec<TimeSeriesRow>,
    long_term_series: Vec<TimeSeriesRow>,
) -> ResultsVm {
    ResultsVm {
        heading: format!("{respondent}さんの回答結果"),
        has_previous: overview.has_previous(),
        submission_count: short_term_series.len(),
        short_term: HorizonVm::new(
            Horizon::ShortTerm,
            questionnaire.horizon_label(Horizon::ShortTerm),
            overview.horizon(Horizon::ShortTerm),
            short_term_series,
        ),
        long_term: HorizonVm::new(
            Horizon::LongTerm,
            questionnaire.horizon_label(Horizon::LongTerm),
            overview.horizon(Horizon::LongTerm),
            long_term_series,
        ),
    }
}

/// Loads the latest comparison and both time series. `None` before the first submission.
///
/// # Errors
///
/// Returns `ViewError::Storage` when the history cannot be read.
pub async fn load_results(
    results: &ResultsService,
    questionnaire: &Questionnaire,
    respondent: &str,
) -> Result<Option<ResultsVm>, ViewError> {
    let Some(overview) = results.overview().await.map_err(ViewError::from)? else {
        return Ok(None);
    };
    let short_term = results
        .time_series(Horizon::ShortTerm)
        .await
        .map_err(ViewError::from)?;
    let long_term = results
        .time_series(Horizon::LongTerm)
        .await
        .map_err(ViewError::from)?;
    Ok(Some(map_results(
        questionnaire,
        respondent,
        &overview,
        short_term,
        long_term,
    )))
}
