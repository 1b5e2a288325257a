use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CompileError;

/// Chart types understood by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Area,
    Bar,
    Column,
    Polar,
    Pie,
    Funnel,
    Treemap,
    Sunburst,
    Scatter,
    Boxplot,
    #[serde(alias = "areaRange", alias = "area-range")]
    Arearange,
}

impl ChartType {
    /// Family whose data shape this chart type consumes.
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartType::Line
            | ChartType::Area
            | ChartType::Bar
            | ChartType::Column
            | ChartType::Polar => ChartFamily::Cartesian,
            ChartType::Pie | ChartType::Funnel | ChartType::Treemap | ChartType::Sunburst => {
                ChartFamily::Categorical
            }
            ChartType::Scatter => ChartFamily::Scatter,
            ChartType::Boxplot => ChartFamily::Boxplot,
            ChartType::Arearange => ChartFamily::Range,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Bar => "bar",
            ChartType::Column => "column",
            ChartType::Polar => "polar",
            ChartType::Pie => "pie",
            ChartType::Funnel => "funnel",
            ChartType::Treemap => "treemap",
            ChartType::Sunburst => "sunburst",
            ChartType::Scatter => "scatter",
            ChartType::Boxplot => "boxplot",
            ChartType::Arearange => "arearange",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = match s.trim().to_ascii_lowercase().as_str() {
            "line" => ChartType::Line,
            "area" => ChartType::Area,
            "bar" => ChartType::Bar,
            "column" => ChartType::Column,
            "polar" => ChartType::Polar,
            "pie" => ChartType::Pie,
            "funnel" => ChartType::Funnel,
            "treemap" => ChartType::Treemap,
            "sunburst" => ChartType::Sunburst,
            "scatter" | "bubble" => ChartType::Scatter,
            "boxplot" => ChartType::Boxplot,
            "arearange" | "area-range" | "range" => ChartType::Arearange,
            other => {
                return Err(CompileError::UnknownChartType {
                    tag: other.to_string(),
                });
            }
        };
        Ok(t)
    }
}

/// Data-shape family, the tag of [`ChartData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFamily {
    Cartesian,
    Categorical,
    Scatter,
    Boxplot,
    Range,
}

impl fmt::Display for ChartFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartFamily::Cartesian => "cartesian",
            ChartFamily::Categorical => "categorical",
            ChartFamily::Scatter => "scatter",
            ChartFamily::Boxplot => "boxplot",
            ChartFamily::Range => "range",
        };
        f.write_str(s)
    }
}

/// A raw cell as delivered by the query layer: a number or a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading of the cell. Text is parsed leniently; "N/A" and friends give `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One measured value. `value` is `NaN` for gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<CellValue>,
    #[serde(default)]
    pub blur: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Point {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            raw_value: if value.is_nan() {
                None
            } else {
                Some(CellValue::Number(value))
            },
            blur: false,
            color: None,
        }
    }

    pub fn gap() -> Self {
        Self::new(f64::NAN)
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn blurred(mut self) -> Self {
        self.blur = true;
        self
    }

    pub fn is_gap(&self) -> bool {
        self.value.is_nan()
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Serde helper: parse `f64` from a JSON number, `null`, or a string; anything that is not a
/// number becomes `NaN` (a gap) rather than a decoding error.
fn de_f64_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, a numeric string, or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<f64>().unwrap_or(f64::NAN))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(f64::NAN)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(f64::NAN)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

/// A named sequence of points aligned with the chart's x-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub data: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: &[f64]) -> Self {
        Self {
            name: name.into(),
            title: None,
            data: values.iter().copied().map(Point::new).collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// One row of the category axis. With two category columns, `x_values[0]` is the
/// secondary (outer) value and `x_values[1]` the primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XValue {
    #[serde(default)]
    pub key: String,
    pub x_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_display_values: Option<Vec<String>>,
}

impl XValue {
    pub fn new(values: &[&str]) -> Self {
        Self {
            key: values.join("|"),
            x_values: values.iter().map(|s| s.to_string()).collect(),
            compare_values: None,
            x_display_values: None,
        }
    }

    pub fn with_compare_value(mut self, v: f64) -> Self {
        self.compare_values = Some(vec![v]);
        self
    }

    /// Label shown on the innermost category axis.
    pub fn primary_label(&self) -> &str {
        let idx = self.x_values.len().saturating_sub(1);
        self.x_display_values
            .as_ref()
            .and_then(|d| d.get(idx))
            .or_else(|| self.x_values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Outer (secondary axis) value when two category columns are present.
    pub fn secondary_value(&self) -> &str {
        self.x_values.first().map(String::as_str).unwrap_or("")
    }
}

fn one() -> u8 {
    1
}

/// Shared shape of cartesian and categorical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChartData {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub x_values: Vec<XValue>,
    #[serde(default = "one")]
    pub x_axis_count: u8,
}

impl SeriesChartData {
    pub fn new(x_values: Vec<XValue>, series: Vec<Series>) -> Self {
        let x_axis_count = x_values
            .first()
            .map(|x| x.x_values.len().clamp(1, 2) as u8)
            .unwrap_or(1);
        Self {
            series,
            x_values,
            x_axis_count,
        }
    }
}

/// A single scatter/bubble row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterRow {
    #[serde(default)]
    pub x: Option<CellValue>,
    #[serde(default)]
    pub y: Option<CellValue>,
    #[serde(default)]
    pub size: Option<CellValue>,
    #[serde(default)]
    pub break_by_point: Option<String>,
    #[serde(default)]
    pub break_by_color: Option<CellValue>,
    #[serde(default)]
    pub blur: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChartData {
    #[serde(default)]
    pub rows: Vec<ScatterRow>,
}

/// Pre-aggregated 5-number summary for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSummary {
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub low: f64,
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub q1: f64,
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub median: f64,
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub q3: f64,
    #[serde(default = "nan", deserialize_with = "de_f64_or_nan")]
    pub high: f64,
    #[serde(default)]
    pub blur: bool,
}

impl BoxSummary {
    pub fn new(low: f64, q1: f64, median: f64, q3: f64, high: f64) -> Self {
        Self {
            low,
            q1,
            median,
            q3,
            high,
            blur: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        [self.low, self.q1, self.median, self.q3, self.high]
            .iter()
            .all(|v| v.is_nan())
    }
}

/// Outlier value attached to the category at `x` (index into `x_values`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierPoint {
    pub x: usize,
    #[serde(deserialize_with = "de_f64_or_nan")]
    pub value: f64,
    #[serde(default)]
    pub blur: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxplotChartData {
    #[serde(default)]
    pub x_values: Vec<XValue>,
    #[serde(default = "one")]
    pub x_axis_count: u8,
    #[serde(default)]
    pub boxes: Vec<BoxSummary>,
    #[serde(default)]
    pub outliers: Vec<OutlierPoint>,
}

/// Lower/upper bound series of a band chart (forecast, trend confidence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSeries {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub lower: Vec<Point>,
    #[serde(default)]
    pub upper: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeChartData {
    #[serde(default)]
    pub x_values: Vec<XValue>,
    #[serde(default = "one")]
    pub x_axis_count: u8,
    #[serde(default)]
    pub series: Vec<RangeSeries>,
}

impl RangeChartData {
    /// Split into one cartesian data set per bound.
    pub fn bounds(&self) -> (SeriesChartData, SeriesChartData) {
        let side = |pick: fn(&RangeSeries) -> &Vec<Point>| SeriesChartData {
            series: self
                .series
                .iter()
                .map(|s| Series {
                    name: s.name.clone(),
                    title: s.title.clone(),
                    data: pick(s).clone(),
                })
                .collect(),
            x_values: self.x_values.clone(),
            x_axis_count: self.x_axis_count,
        };
        (side(|s| &s.lower), side(|s| &s.upper))
    }
}

/// Chart data, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartData {
    Cartesian(SeriesChartData),
    Categorical(SeriesChartData),
    Scatter(ScatterChartData),
    Boxplot(BoxplotChartData),
    Range(RangeChartData),
}

impl ChartData {
    pub fn family(&self) -> ChartFamily {
        match self {
            ChartData::Cartesian(_) => ChartFamily::Cartesian,
            ChartData::Categorical(_) => ChartFamily::Categorical,
            ChartData::Scatter(_) => ChartFamily::Scatter,
            ChartData::Boxplot(_) => ChartFamily::Boxplot,
            ChartData::Range(_) => ChartFamily::Range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_value_accepts_null_and_text() {
        let pts: Vec<Point> =
            serde_json::from_str(r#"[{"value": 3}, {"value": null}, {"value": "N/A"}, {}]"#)
                .unwrap();
        assert_eq!(pts[0].value, 3.0);
        assert!(pts[1].is_gap());
        assert!(pts[2].is_gap());
        assert!(pts[3].is_gap());
    }

    #[test]
    fn chart_type_parsing_and_family() {
        assert_eq!("Pie".parse::<ChartType>().unwrap(), ChartType::Pie);
        assert_eq!(ChartType::Arearange.family(), ChartFamily::Range);
        assert!("gauge".parse::<ChartType>().is_err());
    }

    #[test]
    fn chart_data_is_tagged_by_family() {
        let json = r#"{"type":"cartesian","series":[],"xValues":[{"xValues":["A"]}]}"#;
        let data: ChartData = serde_json::from_str(json).unwrap();
        assert_eq!(data.family(), ChartFamily::Cartesian);
        match data {
            ChartData::Cartesian(d) => assert_eq!(d.x_axis_count, 1),
            _ => panic!("wrong family"),
        }
    }
}
