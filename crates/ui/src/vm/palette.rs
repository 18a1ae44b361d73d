/// Fill for the latest submission in snapshot charts.
pub const CURRENT_SERIES_COLOR: &str = "#8884d8";
/// Fill for the previous submission in snapshot charts.
pub const PREVIOUS_SERIES_COLOR: &str = "#82ca9d";
/// Lighter fill used under the previous radar outline.
pub const PREVIOUS_RADAR_FILL: &str = "#d7f5e2";

pub const CURRENT_SERIES_LABEL: &str = "現在のスコア";
pub const PREVIOUS_SERIES_LABEL: &str = "前回のスコア";

const FALLBACK_LINE_COLOR: &str = "#000000";

/// Stable line colour for a category in the time-series chart.
///
/// Keyed by name so a category keeps its colour across horizons and presets.
#[must_use]
pub fn line_color(category: &str) -> &'static str {
    match category {
        "感情的エンゲージメント" => "#ff0000",
        "認知的エンゲージメント" => "#29c229",
        "行動的エンゲージメント" => "#0000ff",
        "自己効力感" => "#ffa500",
        "社会的エンゲージメント" => "#800080",
        "認知的エンゲージメント(長期的)" | "認知的エンゲージメント(将来)" => "#008000",
        "行動的エンゲージメント(長期的)" | "行動的エンゲージメント(将来)" => "#000080",
        "自己効力感(長期的)" | "自己効力感(将来)" => "#ff8c00",
        _ => FALLBACK_LINE_COLOR,
    }
}
