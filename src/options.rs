//! Data options (which column plays which visual role) and design options (style).
//!
//! Design options are produced fresh per compilation by [`DesignOptions::for_chart_type`]
//! and adjusted through the `with_*` builders; nothing here is shared or mutated in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::format::NumberFormatConfig;
use crate::models::ChartType;
use crate::style::DEFAULT_PALETTE;

// ------------------------ Data options ------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Numeric,
    Datetime,
}

/// Calendar step of a date column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGranularity {
    Years,
    Quarters,
    #[default]
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortType {
    Asc,
    Desc,
}

/// Per-measure chart type override, used when several measures share one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Line,
    Spline,
    Area,
    Column,
    Bar,
}

impl SeriesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Line => "line",
            SeriesType::Spline => "spline",
            SeriesType::Area => "area",
            SeriesType::Column => "column",
            SeriesType::Bar => "bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=", alias = "≤")]
    LessOrEqual,
    #[serde(rename = ">=", alias = "≥")]
    GreaterOrEqual,
    #[serde(rename = "=", alias = "==")]
    Equal,
    #[serde(rename = "!=", alias = "≠")]
    NotEqual,
}

impl ConditionOperator {
    pub fn matches(&self, value: f64, expression: f64) -> bool {
        match self {
            ConditionOperator::LessThan => value < expression,
            ConditionOperator::GreaterThan => value > expression,
            ConditionOperator::LessOrEqual => value <= expression,
            ConditionOperator::GreaterOrEqual => value >= expression,
            ConditionOperator::Equal => value == expression,
            ConditionOperator::NotEqual => value != expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCondition {
    pub color: String,
    pub operator: ConditionOperator,
    #[serde(default, deserialize_with = "de_opt_f64_lenient")]
    pub expression: Option<f64>,
}

/// Color rule attached to a measure column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorRule {
    Uniform {
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    Range {
        min_color: String,
        max_color: String,
        #[serde(default)]
        mid_color: Option<String>,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        mid: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Conditional {
        conditions: Vec<ColorCondition>,
        default_color: String,
    },
}

/// A concrete column bound to a visual role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Column {
    pub name: String,
    pub title: Option<String>,
    pub data_type: ColumnType,
    pub number_format_config: Option<NumberFormatConfig>,
    pub color: Option<ColorRule>,
    pub chart_type: Option<SeriesType>,
    pub sort_type: Option<SortType>,
    pub show_on_right_axis: bool,
    pub treat_null_data_as_zeros: bool,
    pub continuous: bool,
    pub granularity: Option<DateGranularity>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            data_type: ColumnType::Numeric,
            ..Self::new(name)
        }
    }

    pub fn datetime(name: impl Into<String>, granularity: DateGranularity) -> Self {
        Self {
            data_type: ColumnType::Datetime,
            granularity: Some(granularity),
            ..Self::new(name)
        }
    }

    pub fn with_color(mut self, rule: ColorRule) -> Self {
        self.color = Some(rule);
        self
    }

    pub fn with_chart_type(mut self, t: SeriesType) -> Self {
        self.chart_type = Some(t);
        self
    }

    pub fn on_right_axis(mut self) -> Self {
        self.show_on_right_axis = true;
        self
    }

    pub fn nulls_as_zeros(mut self) -> Self {
        self.treat_null_data_as_zeros = true;
        self
    }

    pub fn continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    pub fn with_number_format(mut self, format: NumberFormatConfig) -> Self {
        self.number_format_config = Some(format);
        self
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Role → column mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataOptions {
    pub category: Vec<Column>,
    pub value: Vec<Column>,
    pub break_by: Option<Column>,
    pub x: Option<Column>,
    pub y: Option<Column>,
    pub size: Option<Column>,
    pub color_by: Option<Column>,
    pub break_by_point: Option<Column>,
    /// Explicit colors keyed by series name (cartesian) or category (pie, funnel).
    pub series_to_color_map: BTreeMap<String, String>,
}

impl DataOptions {
    /// The measure column feeding series `index` named `name`.
    pub fn value_column(&self, index: usize, name: &str) -> Option<&Column> {
        if self.break_by.is_some() {
            return self.value.first();
        }
        self.value
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.value.get(index))
    }

    /// A single date category flagged continuous, if any.
    pub fn continuous_date_category(&self) -> Option<&Column> {
        match self.category.as_slice() {
            [c] if c.continuous && c.data_type == ColumnType::Datetime => Some(c),
            _ => None,
        }
    }

    /// Several measures and no break-by: per-measure overrides are unambiguous.
    pub fn has_multiple_measures(&self) -> bool {
        self.break_by.is_none() && self.value.len() > 1
    }
}

// ------------------------ Design options ------------------------

/// Legend placement options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Left,
    Right,
    Top,
    /// Horizontal legend below the plot; the default for dashboards.
    #[default]
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendOptions {
    pub enabled: bool,
    pub position: LegendPosition,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            position: LegendPosition::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisOptions {
    pub enabled: bool,
    pub title: Option<String>,
    pub grid_lines: bool,
    pub labels_enabled: bool,
    pub logarithmic: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Accepts numbers or numeric strings; anything else is ignored.
    #[serde(deserialize_with = "de_opt_f64_lenient")]
    pub tick_interval: Option<f64>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            title: None,
            grid_lines: true,
            labels_enabled: true,
            logarithmic: false,
            min: None,
            max: None,
            tick_interval: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerFill {
    #[default]
    Filled,
    Hollow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSize {
    #[default]
    Small,
    Large,
}

impl MarkerSize {
    pub fn radius(&self) -> f64 {
        match self {
            MarkerSize::Small => 4.0,
            MarkerSize::Large => 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerOptions {
    pub enabled: bool,
    pub fill: MarkerFill,
    pub size: MarkerSize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StackType {
    #[default]
    Classic,
    Stacked,
    Stack100,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueLabelOptions {
    pub enabled: bool,
    pub show_percentage: bool,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataLimits {
    pub series_capacity: usize,
    pub categories_capacity: usize,
}

impl Default for DataLimits {
    fn default() -> Self {
        Self {
            series_capacity: 50,
            categories_capacity: 100_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineWidth {
    Thin,
    #[default]
    Bold,
    Thick,
}

impl LineWidth {
    pub fn px(&self) -> f64 {
        match self {
            LineWidth::Thin => 1.0,
            LineWidth::Bold => 3.0,
            LineWidth::Thick => 5.0,
        }
    }
}

/// Measured size of the host container in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConvolutionMode {
    #[default]
    ByPercentage,
    BySlicesCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvolutionOptions {
    pub enabled: bool,
    pub mode: ConvolutionMode,
    /// Percent of the total a slice needs to stay independent.
    pub minimal_independent_slice_percentage: f64,
    pub independent_slices_count: usize,
}

impl Default for ConvolutionOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: ConvolutionMode::ByPercentage,
            minimal_independent_slice_percentage: 3.0,
            independent_slices_count: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieType {
    #[default]
    Classic,
    Donut,
    Ring,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieOptions {
    pub pie_type: PieType,
    pub convolution: ConvolutionOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelSize {
    Wide,
    #[default]
    Regular,
    Narrow,
}

impl FunnelSize {
    /// Neck width as a percentage of the funnel width.
    pub fn neck_factor(&self) -> f64 {
        match self {
            FunnelSize::Wide => 60.0,
            FunnelSize::Regular => 30.0,
            FunnelSize::Narrow => 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelType {
    #[default]
    Regular,
    Pinched,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelDirection {
    #[default]
    Regular,
    Inverted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunnelOptions {
    pub size: FunnelSize,
    pub funnel_type: FunnelType,
    pub direction: FunnelDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarType {
    #[default]
    Column,
    Area,
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolarOptions {
    pub polar_type: PolarType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScatterOptions {
    pub min_bubble_size: f64,
    pub max_bubble_size: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        Self {
            min_bubble_size: 10.0,
            max_bubble_size: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxType {
    #[default]
    Full,
    Hollow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxplotOptions {
    pub box_type: BoxType,
    pub outliers_enabled: bool,
}

impl Default for BoxplotOptions {
    fn default() -> Self {
        Self {
            box_type: BoxType::Full,
            outliers_enabled: true,
        }
    }
}

/// Style record for one chart. Family-specific sections are ignored by other families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignOptions {
    pub legend: LegendOptions,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub y2_axis: AxisOptions,
    pub marker: MarkerOptions,
    pub stack_type: StackType,
    pub value_labels: ValueLabelOptions,
    pub data_limits: DataLimits,
    pub line_width: LineWidth,
    pub palette: Vec<String>,
    pub container: Option<ContainerSize>,
    pub pie: PieOptions,
    pub funnel: FunnelOptions,
    pub polar: PolarOptions,
    pub scatter: ScatterOptions,
    pub boxplot: BoxplotOptions,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            legend: LegendOptions::default(),
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
            y2_axis: AxisOptions::default(),
            marker: MarkerOptions::default(),
            stack_type: StackType::default(),
            value_labels: ValueLabelOptions::default(),
            data_limits: DataLimits::default(),
            line_width: LineWidth::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            container: None,
            pie: PieOptions::default(),
            funnel: FunnelOptions::default(),
            polar: PolarOptions::default(),
            scatter: ScatterOptions::default(),
            boxplot: BoxplotOptions::default(),
        }
    }
}

impl DesignOptions {
    /// Fresh defaults for a chart type.
    pub fn for_chart_type(chart_type: ChartType) -> Self {
        let base = Self::default();
        match chart_type {
            ChartType::Line | ChartType::Area | ChartType::Arearange => Self {
                marker: MarkerOptions {
                    enabled: true,
                    ..MarkerOptions::default()
                },
                ..base
            },
            ChartType::Bar | ChartType::Column | ChartType::Polar | ChartType::Boxplot => base,
            ChartType::Pie | ChartType::Funnel => Self {
                legend: LegendOptions {
                    enabled: true,
                    position: LegendPosition::Right,
                },
                value_labels: ValueLabelOptions {
                    enabled: true,
                    show_percentage: true,
                    rotation: 0.0,
                },
                data_limits: DataLimits {
                    series_capacity: 50,
                    categories_capacity: 100,
                },
                ..base
            },
            ChartType::Treemap | ChartType::Sunburst => Self {
                legend: LegendOptions {
                    enabled: false,
                    position: LegendPosition::Right,
                },
                data_limits: DataLimits {
                    series_capacity: 1,
                    categories_capacity: 10_000,
                },
                ..base
            },
            ChartType::Scatter => Self {
                data_limits: DataLimits {
                    series_capacity: 50,
                    categories_capacity: 5_000,
                },
                ..base
            },
        }
    }

    pub fn with_stack_type(mut self, stack_type: StackType) -> Self {
        self.stack_type = stack_type;
        self
    }

    pub fn with_data_limits(mut self, series_capacity: usize, categories_capacity: usize) -> Self {
        self.data_limits = DataLimits {
            series_capacity,
            categories_capacity,
        };
        self
    }

    pub fn with_value_labels(mut self, enabled: bool) -> Self {
        self.value_labels.enabled = enabled;
        self
    }

    pub fn with_markers(mut self, enabled: bool) -> Self {
        self.marker.enabled = enabled;
        self
    }

    pub fn with_legend(mut self, legend: LegendOptions) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_y_axis(mut self, axis: AxisOptions) -> Self {
        self.y_axis = axis;
        self
    }

    pub fn with_y2_axis(mut self, axis: AxisOptions) -> Self {
        self.y2_axis = axis;
        self
    }

    pub fn with_x_axis(mut self, axis: AxisOptions) -> Self {
        self.x_axis = axis;
        self
    }

    pub fn with_palette<S: AsRef<str>>(mut self, palette: &[S]) -> Self {
        self.palette = palette.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn with_container(mut self, width: f64, height: f64) -> Self {
        self.container = Some(ContainerSize { width, height });
        self
    }

    pub fn with_pie(mut self, pie: PieOptions) -> Self {
        self.pie = pie;
        self
    }

    pub fn with_funnel(mut self, funnel: FunnelOptions) -> Self {
        self.funnel = funnel;
        self
    }

    pub fn with_polar(mut self, polar: PolarOptions) -> Self {
        self.polar = polar;
        self
    }

    pub fn with_boxplot(mut self, boxplot: BoxplotOptions) -> Self {
        self.boxplot = boxplot;
        self
    }
}

/// Serde helper: `Option<f64>` from a number, a numeric string, or anything else (→ `None`).
fn de_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number or a numeric string")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v).filter(|v| v.is_finite()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}
