use dioxus::prelude::*;

use crate::vm::{
    BarChartVm, LegendEntry, LineChartVm, RadarChartVm, TIME_SERIES_X_LABEL,
    TIME_SERIES_Y_LABEL, line_stroke_width,
};

#[component]
fn SnapshotLegend(entries: Vec<LegendEntry>) -> Element {
    rsx! {
        ul { class: "chart__legend",
            for entry in entries {
                li { key: "{entry.label}", class: "chart__legend-item",
                    span { class: "chart__swatch", style: "background: {entry.color}" }
                    "{entry.label}"
                }
            }
        }
    }
}

#[component]
pub(super) fn BarChart(chart: BarChartVm) -> Element {
    let plot_top = chart.plot.y;
    let plot_bottom = chart.plot.bottom();
    let tick_label_y = plot_bottom + 18.0;

    rsx! {
        figure { class: "chart chart--bar",
            SnapshotLegend { entries: chart.legend.clone() }
            svg {
                class: "chart__svg",
                view_box: "0 0 {chart.width} {chart.height}",
                for tick in chart.ticks.iter() {
                    line {
                        class: "chart__grid",
                        x1: "{tick.position}",
                        y1: "{plot_top}",
                        x2: "{tick.position}",
                        y2: "{plot_bottom}",
                    }
                    text {
                        class: "chart__tick chart__text--middle",
                        x: "{tick.position}",
                        y: "{tick_label_y}",
                        "{tick.label}"
                    }
                }
                for row in chart.rows.iter() {
                    text {
                        class: "chart__label chart__text--end",
                        x: "{row.label_at.x}",
                        y: "{row.label_at.y}",
                        dy: "0.35em",
                        "{row.label}"
                    }
                    for bar in row.bars.iter() {
                        rect {
                            class: "chart__bar",
                            x: "{bar.rect.x}",
                            y: "{bar.rect.y}",
                            width: "{bar.rect.width}",
                            height: "{bar.rect.height}",
                            fill: "{bar.fill}",
                            title { "{bar.tooltip}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn RadarChart(chart: RadarChartVm) -> Element {
    let center = chart.center;

    rsx! {
        figure { class: "chart chart--radar",
            svg {
                class: "chart__svg",
                view_box: "0 0 {chart.width} {chart.height}",
                for ring in chart.rings.iter() {
                    polygon { class: "chart__ring", points: "{ring}" }
                }
                for axis in chart.axes.iter() {
                    line {
                        class: "chart__grid",
                        x1: "{center.x}",
                        y1: "{center.y}",
                        x2: "{axis.end.x}",
                        y2: "{axis.end.y}",
                    }
                    text {
                        class: "chart__label chart__text--{axis.anchor}",
                        x: "{axis.label_at.x}",
                        y: "{axis.label_at.y}",
                        dy: "0.35em",
                        "{axis.label}"
                    }
                }
                for series in chart.series.iter() {
                    polygon {
                        class: "chart__area",
                        points: "{series.points}",
                        fill: "{series.fill}",
                        stroke: "{series.stroke}",
                        style: "fill-opacity: {series.fill_opacity}",
                        title { "{series.label}" }
                    }
                }
            }
            SnapshotLegend { entries: chart.legend.clone() }
        }
    }
}

#[component]
pub(super) fn TimeSeriesChart(chart: LineChartVm) -> Element {
    let mut active = use_signal(|| None::<usize>);
    if chart.is_empty() {
        return rsx! {
            p { class: "chart__empty", "まだ記録がありません。" }
        };
    }
    let plot_left = chart.plot.x;
    let plot_right = chart.plot.right();
    let plot_bottom = chart.plot.bottom();
    let y_tick_x = plot_left - 8.0;
    let x_tick_y = plot_bottom + 18.0;
    let x_label_y = plot_bottom + 36.0;
    let y_label_y = chart.plot.y - 14.0;

    rsx! {
        figure { class: "chart chart--series",
            ul { class: "chart__legend",
                for (index, series) in chart.lines.iter().enumerate() {
                    li {
                        key: "{series.name}",
                        class: if active() == Some(index) { "chart__legend-item chart__legend-item--active" } else { "chart__legend-item" },
                        style: "color: {series.color}",
                        onmouseenter: move |_| active.set(Some(index)),
                        onmouseleave: move |_| active.set(None),
                        span { class: "chart__swatch", style: "background: {series.color}" }
                        "{series.name}"
                    }
                }
            }
            svg {
                class: "chart__svg",
                view_box: "0 0 {chart.width} {chart.height}",
                for tick in chart.y_ticks.iter() {
                    line {
                        class: "chart__grid",
                        x1: "{plot_left}",
                        y1: "{tick.position}",
                        x2: "{plot_right}",
                        y2: "{tick.position}",
                    }
                    text {
                        class: "chart__tick chart__text--end",
                        x: "{y_tick_x}",
                        y: "{tick.position}",
                        dy: "0.35em",
                        "{tick.label}"
                    }
                }
                for tick in chart.x_ticks.iter() {
                    text {
                        class: "chart__tick chart__text--middle",
                        x: "{tick.position}",
                        y: "{x_tick_y}",
                        "{tick.label}"
                    }
                }
                text {
                    class: "chart__axis-title chart__text--end",
                    x: "{plot_right}",
                    y: "{x_label_y}",
                    "{TIME_SERIES_X_LABEL}"
                }
                text {
                    class: "chart__axis-title chart__text--start",
                    x: "{plot_left}",
                    y: "{y_label_y}",
                    "{TIME_SERIES_Y_LABEL}"
                }
                for (index, series) in chart.lines.iter().enumerate() {
                    g {
                        class: "chart__series",
                        onmouseenter: move |_| active.set(Some(index)),
                        onmouseleave: move |_| active.set(None),
                        polyline {
                            class: "chart__line",
                            points: "{series.path}",
                            stroke: "{series.color}",
                            stroke_width: "{line_stroke_width(active(), index)}",
                            fill: "none",
                        }
                        for point in series.points.iter() {
                            circle {
                                class: "chart__point",
                                cx: "{point.at.x}",
                                cy: "{point.at.y}",
                                r: "4",
                                fill: "{series.color}",
                                title { "{point.tooltip}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
