//! Renderer-facing option records.
//!
//! Everything serializes in camelCase and omits unset fields, so the JSON carries only
//! what the compiler decided.

use serde::{Deserialize, Serialize};

use crate::axis::PlotBand;
use crate::models::CellValue;

fn is_false(b: &bool) -> bool {
    !*b
}

/// The compiled configuration handed to the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub chart: ChartSection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x_axis: Vec<AxisOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y_axis: Vec<AxisOutput>,
    pub series: Vec<SeriesOutput>,
    pub legend: LegendOutput,
    pub tooltip: TooltipOutput,
    pub plot_options: PlotOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilldown: Option<Drilldown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSection {
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub polar: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Category,
    Linear,
    Logarithmic,
    Datetime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabels {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOutput {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plot_bands: Vec<PlotBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_interval: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub opposite: bool,
    pub grid_line_width: f64,
    pub labels: AxisLabels,
}

impl AxisOutput {
    pub fn new(axis_type: AxisType) -> Self {
        Self {
            axis_type,
            visible: true,
            title: None,
            categories: None,
            min: None,
            max: None,
            plot_bands: Vec::new(),
            tick_interval: None,
            opposite: false,
            grid_line_width: 0.0,
            labels: AxisLabels { enabled: true },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOutput {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

/// Marker attached to a single point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMarker {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_isolated_point: bool,
}

impl PointMarker {
    pub fn isolated() -> Self {
        Self {
            enabled: true,
            is_isolated_point: true,
        }
    }
}

/// Per-point payload the renderer passes back to the host untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCustom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub blur: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// One emitted data point. `y` and `z` are `Some(None)` for explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<PointMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilldown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<PointCustom>,
}

impl PointOutput {
    /// The plotted y value, `None` for gaps and non-cartesian points.
    pub fn y_value(&self) -> Option<f64> {
        self.y.flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOutput {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
    pub data: Vec<PointOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerOutput>,
}

/// Secondary series reachable through `PointOutput::drilldown`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drilldown {
    pub series: Vec<SeriesOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendLayout {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOutput {
    pub enabled: bool,
    pub align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub layout: LegendLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOutput {
    pub enabled: bool,
    pub use_html: bool,
    /// Name of the point field holding the preformatted text.
    pub point_format_field: String,
}

impl Default for TooltipOutput {
    fn default() -> Self {
        Self {
            enabled: true,
            use_html: true,
            point_format_field: "custom.tooltip".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingOutput {
    Normal,
    Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLabelsOutput {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_percentage: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPlotOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking: Option<StackingOutput>,
    pub marker: MarkerOutput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    pub data_labels: DataLabelsOutput,
    pub connect_nulls: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiePlotOptions {
    pub inner_size: String,
    pub show_in_legend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelPlotOptions {
    pub width: String,
    pub neck_width: String,
    pub neck_height: String,
    pub reversed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubblePlotOptions {
    pub min_size: f64,
    pub max_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxplotPlotOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotOptions {
    pub series: SeriesPlotOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pie: Option<PiePlotOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel: Option<FunnelPlotOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bubble: Option<BubblePlotOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boxplot: Option<BoxplotPlotOptions>,
}
