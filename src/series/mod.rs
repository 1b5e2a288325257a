//! Family series builders.
//!
//! Each builder consumes one data shape plus a [`BuildContext`] and returns a
//! [`FamilyOutput`]: axes, series, optional drilldown, family geometry and the alerts
//! raised while limiting its input.

pub mod boxplot;
pub mod cartesian;
pub mod funnel;
pub mod hierarchy;
pub mod pie;
pub mod range;
pub mod scatter;

use crate::chart::tooltip::FormatConfig;
use crate::chart::types::{AxisOutput, Drilldown, SeriesOutput};
use crate::format::NumberFormatConfig;
use crate::limits::Alert;
use crate::models::ChartType;
use crate::options::{Column, ColumnType, DataOptions, DesignOptions};
use crate::style::ColorResolver;
use crate::translate::Translator;

pub use funnel::FunnelGeometry;

/// Everything a builder reads besides the data itself.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub chart_type: ChartType,
    pub data_options: &'a DataOptions,
    pub design: &'a DesignOptions,
    pub translator: &'a dyn Translator,
    pub locale: &'a str,
}

impl<'a> BuildContext<'a> {
    pub fn resolver(&self) -> ColorResolver<'a> {
        ColorResolver::new(&self.design.palette, &self.data_options.series_to_color_map)
    }

    /// Tooltip formatting for values of `column`.
    pub fn format_config(&self, column: Option<&Column>) -> FormatConfig {
        FormatConfig::new(number_format(column), self.locale, self.translator)
    }

    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key, &[])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyOutput {
    pub x_axis: Vec<AxisOutput>,
    pub y_axis: Vec<AxisOutput>,
    pub series: Vec<SeriesOutput>,
    pub drilldown: Option<Drilldown>,
    pub funnel: Option<FunnelGeometry>,
    pub alerts: Vec<Alert>,
}

/// Flags points that are plotted but have no plotted neighbor; the first and last
/// positions count their outer side as empty.
pub fn isolated_flags(values: &[f64]) -> Vec<bool> {
    let present = |i: usize| values.get(i).is_some_and(|v| v.is_finite());
    (0..values.len())
        .map(|i| present(i) && (i == 0 || !present(i - 1)) && !present(i + 1))
        .collect()
}

/// `Some(v)` for finite values, `None` (serialized as `null`) for gaps.
pub fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

pub fn number_format(column: Option<&Column>) -> NumberFormatConfig {
    column
        .and_then(|c| c.number_format_config.clone())
        .unwrap_or_default()
}

pub fn is_numeric(column: Option<&Column>) -> bool {
    column.is_some_and(|c| c.data_type == ColumnType::Numeric)
}
