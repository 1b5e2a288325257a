//! Axis records built from layouts and extents.

use super::types::{AxisLabels, AxisOutput, AxisType};
use crate::axis::AxisLayout;
use crate::options::AxisOptions;

fn apply_options(mut axis: AxisOutput, opts: &AxisOptions) -> AxisOutput {
    axis.visible = opts.enabled;
    axis.title = opts.title.clone();
    axis.tick_interval = opts.tick_interval.filter(|t| *t > 0.0);
    axis.grid_line_width = if opts.grid_lines { 1.0 } else { 0.0 };
    axis.labels = AxisLabels {
        enabled: opts.labels_enabled,
    };
    axis
}

/// Category (or continuous datetime) x-axis from a layout.
pub fn category_axis(layout: &AxisLayout, opts: &AxisOptions) -> AxisOutput {
    let mut axis = if layout.is_continuous() {
        AxisOutput::new(AxisType::Datetime)
    } else {
        let mut a = AxisOutput::new(AxisType::Category);
        a.categories = Some(layout.categories.clone());
        a.plot_bands = layout.plot_bands.clone();
        a
    };
    axis = apply_options(axis, opts);
    // Category axes draw no vertical grid.
    axis.grid_line_width = 0.0;
    axis
}

/// Category axis over an explicit list of labels (scatter text axes).
pub fn label_axis(labels: Vec<String>, opts: &AxisOptions) -> AxisOutput {
    let mut axis = AxisOutput::new(AxisType::Category);
    axis.categories = Some(labels);
    apply_options(axis, opts)
}

/// Numeric axis with an already finalized extent.
pub fn value_axis(opts: &AxisOptions, extent: (Option<f64>, Option<f64>), opposite: bool) -> AxisOutput {
    let axis_type = if opts.logarithmic {
        AxisType::Logarithmic
    } else {
        AxisType::Linear
    };
    let mut axis = apply_options(AxisOutput::new(axis_type), opts);
    axis.min = extent.0;
    axis.max = extent.1;
    axis.opposite = opposite;
    axis
}
