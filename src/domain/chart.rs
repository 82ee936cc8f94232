// Chart description domain models - renderer-agnostic, consumed by a remote UI
use serde::{Deserialize, Serialize};

/// Title shown by every builder when the filtered input has no rows.
pub const NO_DATA_TITLE: &str = "No Data Available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

/// One plotted series. The axes a field feeds depend on the chart kind:
/// line and bar charts use `labels` (dates/categories) against `y`, pie
/// charts use `labels` against `y` as shares, scatter charts use `x`/`y`
/// with an optional `sizes` encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Series {
    pub fn labeled(name: impl Into<String>, labels: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            labels,
            x: Vec::new(),
            y,
            sizes: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPlacement {
    #[default]
    TopRight,
    Right,
    Bottom,
    Hidden,
}

/// Uniform styling applied to every chart after series construction.
/// Defaults match the original dashboard layout options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub plot_background: String,
    pub paper_background: String,
    pub font_color: String,
    pub title_size: u32,
    pub title_align: TitleAlign,
    pub axis_line_color: String,
    pub grid_color: String,
    pub legend: LegendPlacement,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            plot_background: "white".to_string(),
            paper_background: "white".to_string(),
            font_color: "#333".to_string(),
            title_size: 24,
            title_align: TitleAlign::Center,
            axis_line_color: "#333".to_string(),
            grid_color: "#f0f0f0".to_string(),
            legend: LegendPlacement::TopRight,
        }
    }
}

/// A complete declarative chart. Never mutated after construction; the
/// rendering layer receives it as JSON and draws it however it likes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub title: String,
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub series: Vec<Series>,
    /// Donut hole radius fraction for pie charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    pub style: ChartStyle,
}

impl ChartDescription {
    pub fn new(title: impl Into<String>, kind: ChartKind, style: ChartStyle) -> Self {
        Self {
            title: title.into(),
            kind,
            x_label: None,
            y_label: None,
            series: Vec::new(),
            hole: None,
            style,
        }
    }

    /// The fallback chart for empty input: placeholder title, no series,
    /// no axis labels. Style is still applied so the empty frame matches
    /// the rest of the dashboard.
    pub fn placeholder(kind: ChartKind, style: ChartStyle) -> Self {
        Self::new(NO_DATA_TITLE, kind, style)
    }

    pub fn is_placeholder(&self) -> bool {
        self.title == NO_DATA_TITLE && self.series.is_empty()
    }
}
