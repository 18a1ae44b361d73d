use dioxus::prelude::*;
use survey_core::scoring::Horizon;

use crate::context::AppContext;
use crate::views::guide::{EngagementGuide, ReferenceLink};
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{
    ChartKind, HorizonVm, ScoreRowVm, bar_chart, load_results, radar_chart, time_series_chart,
};

use super::charts::{BarChart, RadarChart, TimeSeriesChart};

const HORIZONS: [Horizon; 2] = [Horizon::ShortTerm, Horizon::LongTerm];

#[component]
pub(super) fn ResultsPanel(respondent: String, on_retake: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();
    let questionnaire = ctx.survey_loop().questionnaire();
    let settings = ctx.settings();
    let mut chart = use_signal(|| settings.chart);
    let mut tab = use_signal(Horizon::default);

    let resource = use_resource(move || {
        let results = results.clone();
        let questionnaire = questionnaire.clone();
        let respondent = respondent.clone();
        async move { load_results(&results, &questionnaire, &respondent).await }
    });
    let state = view_state_from_resource(&resource);
    let active_chart = chart();
    let active_tab = tab();

    rsx! {
        div { class: "results",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "読み込み中..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "再読み込み"
                    }
                },
                ViewState::Ready(None) => rsx! {
                    p { "まだ回答がありません。" }
                },
                ViewState::Ready(Some(data)) => rsx! {
                    h1 { class: "results__heading", "{data.heading}" }
                    div { class: "chart-toggle",
                        for kind in ChartKind::toggle_order(settings.chart) {
                            button {
                                key: "{kind}",
                                class: if kind == active_chart { "btn btn-primary" } else { "btn btn-outline" },
                                r#type: "button",
                                onclick: move |_| chart.set(kind),
                                "{kind.label()}"
                            }
                        }
                    }
                    div { class: "tabs", role: "tablist",
                        for horizon in HORIZONS {
                            button {
                                key: "{horizon:?}",
                                class: if horizon == active_tab { "tabs__trigger tabs__trigger--active" } else { "tabs__trigger" },
                                r#type: "button",
                                role: "tab",
                                onclick: move |_| tab.set(horizon),
                                "{data.horizon(horizon).label}"
                            }
                        }
                    }
                    HorizonPanel {
                        horizon: data.horizon(active_tab).clone(),
                        chart: active_chart,
                        has_previous: data.has_previous,
                        series_offset: settings.series_offset,
                    }
                    EngagementGuide {}
                    ReferenceLink {}
                    div { class: "results__actions",
                        button {
                            class: "btn btn-primary",
                            id: "survey-retake",
                            r#type: "button",
                            onclick: move |_| on_retake.call(()),
                            "もう一度測定する"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn HorizonPanel(horizon: HorizonVm, chart: ChartKind, has_previous: bool, series_offset: f64) -> Element {
    let series = time_series_chart(&horizon.time_series, series_offset);
    let snapshot = match chart {
        ChartKind::Radar => rsx! {
            RadarChart { chart: radar_chart(&horizon.scores, has_previous) }
        },
        ChartKind::Bar => rsx! {
            BarChart { chart: bar_chart(&horizon.scores, has_previous) }
        },
    };

    rsx! {
        section { class: "horizon", role: "tabpanel",
            div { class: "horizon__snapshot",
                div { class: "horizon__chart", {snapshot} }
                ScoreTable { rows: horizon.rows.clone(), has_previous }
            }
            div { class: "horizon__series",
                h3 { class: "horizon__series-title", "{horizon.series_title}" }
                TimeSeriesChart { chart: series }
            }
        }
    }
}

#[component]
fn ScoreTable(rows: Vec<ScoreRowVm>, has_previous: bool) -> Element {
    rsx! {
        table { class: "score-table",
            thead {
                tr {
                    th { "カテゴリー" }
                    th { "現在のスコア" }
                    if has_previous {
                        th { "前回のスコア" }
                    }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.name}",
                        td { "{row.name}" }
                        td { "{row.score}" }
                        if has_previous {
                            if let Some(previous) = row.previous {
                                td { "{previous}" }
                            } else {
                                td { "-" }
                            }
                        }
                    }
                }
            }
        }
    }
}
