mod chart_vm;
mod palette;
mod results_vm;
mod survey_vm;

pub use chart_vm::{
    Bar, BarChartVm, BarRow, ChartKind, LegendEntry, LineChartVm, LinePoint, LineSeries,
    ParseChartKindError, Point, RadarAxis, RadarChartVm, RadarSeries, Rect, SCORE_DOMAIN_MAX,
    SCORE_TICKS, TIME_SERIES_X_LABEL, TIME_SERIES_Y_LABEL, Tick, bar_chart, points_attr,
    line_stroke_width, radar_chart, time_series_chart, tooltip_value,
};
pub use palette::{
    CURRENT_SERIES_COLOR, CURRENT_SERIES_LABEL, PREVIOUS_RADAR_FILL, PREVIOUS_SERIES_COLOR,
    PREVIOUS_SERIES_LABEL, line_color,
};
pub use results_vm::{HorizonVm, ResultsVm, ScoreRowVm, format_score, load_results, map_results};
pub use survey_vm::{AnswerOptionVm, QuestionVm, SurveyIntent, SurveyScreen, SurveyVm};
