use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use services::TimeSeriesRow;
use survey_core::model::SubmissionId;
use survey_core::scoring::ComparedScore;

use super::palette::{
    CURRENT_SERIES_COLOR, CURRENT_SERIES_LABEL, PREVIOUS_RADAR_FILL, PREVIOUS_SERIES_COLOR,
    PREVIOUS_SERIES_LABEL, line_color,
};
use super::results_vm::format_score;

/// Upper bound of every score axis. The lower bound is zero.
pub const SCORE_DOMAIN_MAX: f64 = 5.0;
/// Grid lines drawn on score axes.
pub const SCORE_TICKS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

//
// ─── CHART KIND ────────────────────────────────────────────────────────────────
//

/// Snapshot chart style on the results screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Radar,
    Bar,
}

impl ChartKind {
    /// Toggle order on the results screen: the configured default comes first.
    #[must_use]
    pub fn toggle_order(first: ChartKind) -> [ChartKind; 2] {
        match first {
            ChartKind::Radar => [ChartKind::Radar, ChartKind::Bar],
            ChartKind::Bar => [ChartKind::Bar, ChartKind::Radar],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Radar => "radar",
            ChartKind::Bar => "bar",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Radar => "レーダーチャート",
            ChartKind::Bar => "棒グラフ",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseChartKindError(pub String);

impl fmt::Display for ParseChartKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chart kind `{}` (expected radar or bar)", self.0)
    }
}

impl std::error::Error for ParseChartKindError {}

impl FromStr for ChartKind {
    type Err = ParseChartKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radar" => Ok(ChartKind::Radar),
            "bar" => Ok(ChartKind::Bar),
            _ => Err(ParseChartKindError(s.to_string())),
        }
    }
}

//
// ─── GEOMETRY ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Axis tick: the data value, its pixel position along the axis, and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[allow(clippy::cast_precision_loss)]
fn count_f64(count: usize) -> f64 {
    count as f64
}

/// Pixel length of `value` on an axis of `span` pixels covering `0..=SCORE_DOMAIN_MAX`.
fn scale(value: f64, span: f64) -> f64 {
    value / SCORE_DOMAIN_MAX * span
}

/// SVG `points` attribute for a polygon or polyline.
#[must_use]
pub fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{:.2},{:.2}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn snapshot_legend(with_previous: bool) -> Vec<LegendEntry> {
    let mut legend = vec![LegendEntry {
        label: CURRENT_SERIES_LABEL,
        color: CURRENT_SERIES_COLOR,
    }];
    if with_previous {
        legend.push(LegendEntry {
            label: PREVIOUS_SERIES_LABEL,
            color: PREVIOUS_SERIES_COLOR,
        });
    }
    legend
}

//
// ─── BAR CHART ─────────────────────────────────────────────────────────────────
//

const BAR_CHART_WIDTH: f64 = 560.0;
const BAR_LABEL_WIDTH: f64 = 220.0;
const BAR_ROW_HEIGHT: f64 = 44.0;
const BAR_ROW_PADDING: f64 = 6.0;
const BAR_MARGIN_TOP: f64 = 36.0;
const BAR_MARGIN_RIGHT: f64 = 20.0;
const BAR_MARGIN_BOTTOM: f64 = 28.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub fill: &'static str,
    pub value: f64,
    pub tooltip: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub label_at: Point,
    pub bars: Vec<Bar>,
}

/// Horizontal bar chart: one row per category, score along the x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChartVm {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub ticks: Vec<Tick>,
    pub rows: Vec<BarRow>,
    pub legend: Vec<LegendEntry>,
}

#[must_use]
pub fn bar_chart(scores: &[ComparedScore], with_previous: bool) -> BarChartVm {
    let plot = Rect {
        x: BAR_LABEL_WIDTH,
        y: BAR_MARGIN_TOP,
        width: BAR_CHART_WIDTH - BAR_LABEL_WIDTH - BAR_MARGIN_RIGHT,
        height: BAR_ROW_HEIGHT * count_f64(scores.len()),
    };
    let series = if with_previous { 2.0 } else { 1.0 };
    let bar_height = (BAR_ROW_HEIGHT - 2.0 * BAR_ROW_PADDING) / series;

    let make_bar = |top: f64, value: f64, fill: &'static str, series_label: &str| Bar {
        rect: Rect {
            x: plot.x,
            y: top,
            width: scale(value, plot.width),
            height: bar_height,
        },
        fill,
        value,
        tooltip: format!("{series_label}: {}", format_score(value)),
    };

    let rows = scores
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row_top = plot.y + BAR_ROW_HEIGHT * count_f64(index);
            let mut bars = vec![make_bar(
                row_top + BAR_ROW_PADDING,
                item.score,
                CURRENT_SERIES_COLOR,
                CURRENT_SERIES_LABEL,
            )];
            if let (true, Some(previous)) = (with_previous, item.previous_score) {
                bars.push(make_bar(
                    row_top + BAR_ROW_PADDING + bar_height,
                    previous,
                    PREVIOUS_SERIES_COLOR,
                    PREVIOUS_SERIES_LABEL,
                ));
            }
            BarRow {
                label: item.name.clone(),
                label_at: Point {
                    x: plot.x - 8.0,
                    y: row_top + BAR_ROW_HEIGHT / 2.0,
                },
                bars,
            }
        })
        .collect();

    let ticks = std::iter::once(0.0)
        .chain(SCORE_TICKS)
        .map(|value| Tick {
            value,
            position: plot.x + scale(value, plot.width),
            label: format_score(value),
        })
        .collect();

    BarChartVm {
        width: BAR_CHART_WIDTH,
        height: plot.bottom() + BAR_MARGIN_BOTTOM,
        plot,
        ticks,
        rows,
        legend: snapshot_legend(with_previous),
    }
}

//
// ─── RADAR CHART ───────────────────────────────────────────────────────────────
//

const RADAR_CHART_WIDTH: f64 = 560.0;
const RADAR_CHART_HEIGHT: f64 = 420.0;
const RADAR_RADIUS: f64 = 140.0;
const RADAR_LABEL_GAP: f64 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub struct RadarAxis {
    pub label: String,
    pub end: Point,
    pub label_at: Point,
    /// SVG `text-anchor` keeping the label outside the polygon.
    pub anchor: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarSeries {
    pub label: &'static str,
    pub stroke: &'static str,
    pub fill: &'static str,
    pub fill_opacity: f64,
    pub vertices: Vec<Point>,
    pub points: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadarChartVm {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    /// One polygon per score tick.
    pub rings: Vec<String>,
    pub axes: Vec<RadarAxis>,
    pub series: Vec<RadarSeries>,
    pub legend: Vec<LegendEntry>,
}

fn radar_vertex(center: Point, index: usize, count: usize, distance: f64) -> Point {
    let angle = -FRAC_PI_2 + TAU * count_f64(index) / count_f64(count.max(1));
    Point {
        x: center.x + distance * angle.cos(),
        y: center.y + distance * angle.sin(),
    }
}

/// Radar chart with the first category at twelve o'clock, proceeding clockwise.
///
/// A missing previous score is drawn at the centre.
#[must_use]
pub fn radar_chart(scores: &[ComparedScore], with_previous: bool) -> RadarChartVm {
    let center = Point {
        x: RADAR_CHART_WIDTH / 2.0,
        y: RADAR_CHART_HEIGHT / 2.0 + 10.0,
    };
    let count = scores.len();
    let vertex = |index: usize, value: f64| {
        radar_vertex(center, index, count, scale(value, RADAR_RADIUS))
    };

    let rings = SCORE_TICKS
        .iter()
        .map(|&tick| {
            let ring: Vec<Point> = (0..count).map(|index| vertex(index, tick)).collect();
            points_attr(&ring)
        })
        .collect();

    let axes = scores
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let end = vertex(index, SCORE_DOMAIN_MAX);
            let label_at = radar_vertex(center, index, count, RADAR_RADIUS + RADAR_LABEL_GAP);
            let anchor = if (label_at.x - center.x).abs() < 1.0 {
                "middle"
            } else if label_at.x > center.x {
                "start"
            } else {
                "end"
            };
            RadarAxis {
                label: item.name.clone(),
                end,
                label_at,
                anchor,
            }
        })
        .collect();

    let current: Vec<Point> = scores
        .iter()
        .enumerate()
        .map(|(index, item)| vertex(index, item.score))
        .collect();
    let mut series = vec![RadarSeries {
        label: CURRENT_SERIES_LABEL,
        stroke: CURRENT_SERIES_COLOR,
        fill: CURRENT_SERIES_COLOR,
        fill_opacity: 0.6,
        points: points_attr(&current),
        vertices: current,
    }];
    if with_previous {
        let previous: Vec<Point> = scores
            .iter()
            .enumerate()
            .map(|(index, item)| vertex(index, item.previous_score.unwrap_or(0.0)))
            .collect();
        series.push(RadarSeries {
            label: PREVIOUS_SERIES_LABEL,
            stroke: PREVIOUS_SERIES_COLOR,
            fill: PREVIOUS_RADAR_FILL,
            fill_opacity: 0.3,
            points: points_attr(&previous),
            vertices: previous,
        });
    }

    RadarChartVm {
        width: RADAR_CHART_WIDTH,
        height: RADAR_CHART_HEIGHT,
        center,
        radius: RADAR_RADIUS,
        rings,
        axes,
        series,
        legend: snapshot_legend(with_previous),
    }
}

//
// ─── TIME SERIES ───────────────────────────────────────────────────────────────
//

const LINE_CHART_WIDTH: f64 = 640.0;
const LINE_CHART_HEIGHT: f64 = 360.0;
const LINE_MARGIN_TOP: f64 = 40.0;
const LINE_MARGIN_RIGHT: f64 = 30.0;
const LINE_MARGIN_BOTTOM: f64 = 44.0;
const LINE_MARGIN_LEFT: f64 = 56.0;

pub const TIME_SERIES_X_LABEL: &str = "回数";
pub const TIME_SERIES_Y_LABEL: &str = "スコア";

const LINE_STROKE_WIDTH: f64 = 1.0;
const ACTIVE_LINE_STROKE_WIDTH: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LinePoint {
    pub submission: SubmissionId,
    /// Plotted value, including the series offset.
    pub value: f64,
    pub at: Point,
    pub tooltip: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<LinePoint>,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineChartVm {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub lines: Vec<LineSeries>,
}

impl LineChartVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The hovered line is drawn thicker and its legend entry bold.
#[must_use]
pub fn line_stroke_width(active: Option<usize>, index: usize) -> f64 {
    if active == Some(index) {
        ACTIVE_LINE_STROKE_WIDTH
    } else {
        LINE_STROKE_WIDTH
    }
}

/// Hover value for a time-series point: rounded down to the nearest half.
#[must_use]
pub fn tooltip_value(value: f64) -> f64 {
    (value * 2.0).floor() / 2.0
}

/// One line per category across every submission, x = submission order, y fixed to `0..=5`.
///
/// The category at position `i` within a row is lifted by `i * offset_step` so that equal
/// scores stay visible as separate lines. Lines are keyed by category name in order of first
/// appearance.
#[must_use]
pub fn time_series_chart(rows: &[TimeSeriesRow], offset_step: f64) -> LineChartVm {
    let plot = Rect {
        x: LINE_MARGIN_LEFT,
        y: LINE_MARGIN_TOP,
        width: LINE_CHART_WIDTH - LINE_MARGIN_LEFT - LINE_MARGIN_RIGHT,
        height: LINE_CHART_HEIGHT - LINE_MARGIN_TOP - LINE_MARGIN_BOTTOM,
    };
    let x_at = |position: usize| {
        if rows.len() <= 1 {
            plot.x + plot.width / 2.0
        } else {
            plot.x + plot.width * count_f64(position) / count_f64(rows.len() - 1)
        }
    };
    let y_at = |value: f64| plot.bottom() - scale(value, plot.height);

    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        for item in &row.scores {
            if !names.contains(&item.name.as_str()) {
                names.push(&item.name);
            }
        }
    }

    let lines = names
        .into_iter()
        .map(|name| {
            let points: Vec<LinePoint> = rows
                .iter()
                .enumerate()
                .filter_map(|(position, row)| {
                    let (index, item) = row
                        .scores
                        .iter()
                        .enumerate()
                        .find(|(_, item)| item.name == name)?;
                    let value = item.score + count_f64(index) * offset_step;
                    Some(LinePoint {
                        submission: row.id,
                        value,
                        at: Point {
                            x: x_at(position),
                            y: y_at(value),
                        },
                        tooltip: format!("{name}: {}", format_score(tooltip_value(value))),
                    })
                })
                .collect();
            let vertices: Vec<Point> = points.iter().map(|point| point.at).collect();
            LineSeries {
                name: name.to_string(),
                color: line_color(name),
                path: points_attr(&vertices),
                points,
            }
        })
        .collect();

    let x_ticks = rows
        .iter()
        .enumerate()
        .map(|(position, row)| Tick {
            value: f64::from(row.id.value()),
            position: x_at(position),
            label: row.id.to_string(),
        })
        .collect();
    let y_ticks = SCORE_TICKS
        .iter()
        .map(|&value| Tick {
            value,
            position: y_at(value),
            label: format_score(value),
        })
        .collect();

    LineChartVm {
        width: LINE_CHART_WIDTH,
        height: LINE_CHART_HEIGHT,
        plot,
        x_ticks,
        y_ticks,
        lines,
    }
}
