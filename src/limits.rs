//! Data limits: series and category capacities with advisory alerts.
//!
//! Truncation never fails a compilation. Each dimension that overflows yields exactly one
//! [`Alert`], and downstream components only ever see the truncated data.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{Series, SeriesChartData, XValue};
use crate::options::DataLimits;
use crate::translate::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertCode {
    SeriesSliceWarning,
    CategoriesSliceWarning,
}

impl AlertCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCode::SeriesSliceWarning => "seriesSliceWarning",
            AlertCode::CategoriesSliceWarning => "categoriesSliceWarning",
        }
    }
}

/// Which dimension was truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitDimension {
    Series,
    X,
    X2,
    ScatterX,
    ScatterY,
}

impl LimitDimension {
    fn code(&self) -> AlertCode {
        match self {
            LimitDimension::Series => AlertCode::SeriesSliceWarning,
            _ => AlertCode::CategoriesSliceWarning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertParams {
    pub dimension: LimitDimension,
    pub count: usize,
    pub capacity: usize,
}

/// Advisory record attached to the compiled output; the host decides how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub code: AlertCode,
    pub params: AlertParams,
}

impl Alert {
    /// Localized message, e.g. "Showing first 50 of 200 series".
    pub fn message(&self, translator: &dyn Translator) -> String {
        let count = self.params.count.to_string();
        let capacity = self.params.capacity.to_string();
        translator.translate(
            &format!("alerts.{}", self.code.as_str()),
            &[("count", count.as_str()), ("capacity", capacity.as_str())],
        )
    }
}

/// Keep at most `capacity` items. Returns the retained prefix and an alert iff items were dropped.
pub fn truncate<T>(items: &[T], capacity: usize, dimension: LimitDimension) -> (&[T], Option<Alert>) {
    let count = items.len();
    if count <= capacity {
        return (items, None);
    }
    (&items[..capacity], Some(overflow(dimension, count, capacity)))
}

fn overflow(dimension: LimitDimension, count: usize, capacity: usize) -> Alert {
    warn!("truncating {dimension:?}: {count} items exceed capacity {capacity}");
    Alert {
        code: dimension.code(),
        params: AlertParams {
            dimension,
            count,
            capacity,
        },
    }
}

/// Indices of the x-values that survive the category limits, plus their alerts.
///
/// With two category axes the outer (`x2`) dimension is limited by distinct secondary
/// values first, so whole groups are dropped before the inner `x` limit applies. The
/// blank separator tick between two groups counts against the inner limit.
pub fn limit_categories(
    x_values: &[XValue],
    x_axis_count: u8,
    capacity: usize,
) -> (Vec<usize>, Vec<Alert>) {
    let mut alerts = Vec::new();
    let mut kept: Vec<usize> = (0..x_values.len()).collect();

    if x_axis_count >= 2 {
        let mut distinct: Vec<&str> = Vec::new();
        for x in x_values {
            let v = x.secondary_value();
            if !distinct.contains(&v) {
                distinct.push(v);
            }
        }
        let (allowed, alert) = truncate(&distinct, capacity, LimitDimension::X2);
        if alert.is_some() {
            let allowed: BTreeSet<&str> = allowed.iter().copied().collect();
            kept.retain(|&i| allowed.contains(x_values[i].secondary_value()));
        }
        alerts.extend(alert);
    }

    if x_axis_count < 2 {
        let (kept_x, alert) = truncate(&kept, capacity, LimitDimension::X);
        alerts.extend(alert);
        return (kept_x.to_vec(), alerts);
    }

    // Tick count of each prefix: one per row plus one per group change.
    let mut ticks = 0usize;
    let mut fits = 0usize;
    let mut prev: Option<&str> = None;
    for &i in &kept {
        let current = x_values[i].secondary_value();
        ticks += if prev.is_some_and(|p| p != current) { 2 } else { 1 };
        if ticks <= capacity {
            fits += 1;
        }
        prev = Some(current);
    }
    if ticks > capacity {
        alerts.push(overflow(LimitDimension::X, ticks, capacity));
        kept.truncate(fits);
    }
    (kept, alerts)
}

/// Apply series and category limits to cartesian/categorical data. Series point arrays
/// are re-indexed to stay aligned with the kept x-values.
pub fn limit_series_data(data: &SeriesChartData, limits: DataLimits) -> (SeriesChartData, Vec<Alert>) {
    let mut alerts = Vec::new();

    let (series, alert) = truncate(&data.series, limits.series_capacity, LimitDimension::Series);
    alerts.extend(alert);

    let (kept_x, category_alerts) =
        limit_categories(&data.x_values, data.x_axis_count, limits.categories_capacity);
    alerts.extend(category_alerts);

    let out = if kept_x.len() == data.x_values.len() {
        SeriesChartData {
            series: series.to_vec(),
            x_values: data.x_values.clone(),
            x_axis_count: data.x_axis_count,
        }
    } else {
        SeriesChartData {
            series: series
                .iter()
                .map(|s| Series {
                    name: s.name.clone(),
                    title: s.title.clone(),
                    data: kept_x.iter().filter_map(|&i| s.data.get(i).cloned()).collect(),
                })
                .collect(),
            x_values: kept_x.iter().map(|&i| data.x_values[i].clone()).collect(),
            x_axis_count: data.x_axis_count,
        }
    };
    (out, alerts)
}
