use log::debug;

use super::continuous::{build_continuous_layout, format_date_category};
use super::{AxisLayout, PlotBand, Tick};
use crate::models::XValue;
use crate::options::{Column, ColumnType, DataOptions};

/// Build the category axis layout for cartesian-shaped data.
///
/// - single category axis: one tick per x-value, `index_map[i] = i`
/// - two category axes: ticks grouped by the secondary value, a blank separator tick
///   between groups and one plot band per group
/// - a single continuous date column: datetime ticks with calendar gaps filled,
///   at most `max_categories` ticks in total
pub fn build_layout(
    x_values: &[XValue],
    x_axis_count: u8,
    data_options: &DataOptions,
    max_categories: usize,
) -> AxisLayout {
    if let Some(col) = data_options.continuous_date_category() {
        debug!("continuous datetime axis for '{}'", col.name);
        return build_continuous_layout(
            x_values,
            col.granularity.unwrap_or_default(),
            max_categories,
        );
    }

    if x_axis_count >= 2 {
        let secondary = data_options.category.first();
        let primary = data_options.category.get(1);
        dual_layout(x_values, secondary, primary)
    } else {
        single_layout(x_values, data_options.category.first())
    }
}

fn single_layout(x_values: &[XValue], column: Option<&Column>) -> AxisLayout {
    AxisLayout {
        categories: x_values.iter().map(|x| primary_label(x, column)).collect(),
        ticks: (0..x_values.len()).map(Tick::Data).collect(),
        plot_bands: Vec::new(),
        tick_values: None,
    }
}

fn dual_layout(x_values: &[XValue], secondary: Option<&Column>, primary: Option<&Column>) -> AxisLayout {
    let mut categories = Vec::with_capacity(x_values.len());
    let mut ticks = Vec::with_capacity(x_values.len());
    let mut plot_bands = Vec::new();

    let mut prev: Option<&str> = None;
    let mut band_start = 0usize;

    for (i, x) in x_values.iter().enumerate() {
        let current = x.secondary_value();
        if let Some(p) = prev
            && p != current
        {
            plot_bands.push(band(p, secondary, band_start, ticks.len() - 1));
            categories.push(" ".to_string());
            ticks.push(Tick::Separator);
            band_start = ticks.len();
        }
        categories.push(primary_label(x, primary));
        ticks.push(Tick::Data(i));
        prev = Some(current);
    }
    if let Some(p) = prev {
        plot_bands.push(band(p, secondary, band_start, ticks.len() - 1));
    }

    AxisLayout {
        categories,
        ticks,
        plot_bands,
        tick_values: None,
    }
}

/// Plot band covering ticks `first..=last`, edges half a tick outside.
fn band(text: &str, column: Option<&Column>, first: usize, last: usize) -> PlotBand {
    PlotBand {
        text: date_label(text, column).unwrap_or_else(|| text.to_string()),
        from: first as f64 - 0.5,
        to: last as f64 + 0.5,
    }
}

fn primary_label(x: &XValue, column: Option<&Column>) -> String {
    let has_display = x
        .x_display_values
        .as_ref()
        .is_some_and(|d| !d.is_empty());
    if has_display {
        return x.primary_label().to_string();
    }
    let raw = x.primary_label();
    date_label(raw, column).unwrap_or_else(|| raw.to_string())
}

fn date_label(raw: &str, column: Option<&Column>) -> Option<String> {
    let col = column.filter(|c| c.data_type == ColumnType::Datetime)?;
    format_date_category(raw, col.granularity.unwrap_or_default())
}
