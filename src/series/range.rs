//! Area-range bands (forecast and trend confidence intervals).

use super::cartesian::{extent_rules, plan};
use super::{BuildContext, FamilyOutput, finite};
use crate::axis::{Stacking, auto_extent};
use crate::chart::axes::{category_axis, value_axis};
use crate::chart::tooltip::{PointContext, PointValues, format_point};
use crate::chart::types::{AxisOutput, PointCustom, PointOutput, SeriesOutput};
use crate::models::RangeChartData;
use crate::options::AxisOptions;

/// Run the cartesian pipeline once per bound and zip the results into `{low, high}`
/// points. Each value axis spans both bounds of the series drawn against it.
pub fn build_range(data: &RangeChartData, ctx: &BuildContext) -> FamilyOutput {
    let design = ctx.design;
    let (lower_data, upper_data) = data.bounds();
    let lower = plan(&lower_data, ctx);
    let upper = plan(&upper_data, ctx);

    let mut left: Vec<&[f64]> = Vec::new();
    let mut right: Vec<&[f64]> = Vec::new();
    let mut series = Vec::with_capacity(lower.series.len());
    for (idx, (lo, hi)) in lower.series.iter().zip(&upper.series).enumerate() {
        let side = if lo.right_axis { &mut right } else { &mut left };
        side.push(&lo.values);
        side.push(&hi.values);

        let column = ctx.data_options.value_column(idx, &lo.name);
        let fmt = ctx.format_config(column);
        let points = lower
            .layout
            .ticks
            .iter()
            .enumerate()
            .map(|(pos, tick)| {
                let (low, high) = (lo.values[pos], hi.values[pos]);
                let mut p = PointOutput {
                    x: lower.layout.tick_values.as_ref().map(|tv| tv[pos]),
                    low: finite(low),
                    high: finite(high),
                    ..PointOutput::default()
                };
                if tick.data_index().is_some() {
                    let label = lower.layout.categories[pos].as_str();
                    let tip = PointContext::new(&lo.name, PointValues::Range { low, high })
                        .with_category(label);
                    p.custom = Some(PointCustom {
                        x_display_value: Some(label.to_string()),
                        tooltip: Some(format_point(&tip, &fmt)),
                        ..PointCustom::default()
                    });
                }
                p
            })
            .collect();

        series.push(SeriesOutput {
            name: lo.name.clone(),
            data: points,
            color: Some(lo.color.clone()),
            y_axis: lo.right_axis.then_some(1),
            ..SeriesOutput::default()
        });
    }

    let mut y_axis = vec![side_axis(&left, ctx, &design.y_axis, false)];
    if !right.is_empty() {
        y_axis.push(side_axis(&right, ctx, &design.y2_axis, true));
    }

    FamilyOutput {
        x_axis: vec![category_axis(&lower.layout, &design.x_axis)],
        y_axis,
        series,
        // Both bounds share the same limits, so the lower plan's alerts cover them.
        alerts: lower.alerts,
        ..FamilyOutput::default()
    }
}

fn side_axis(values: &[&[f64]], ctx: &BuildContext, axis: &AxisOptions, opposite: bool) -> AxisOutput {
    let rules = extent_rules(ctx.chart_type, ctx.design, axis);
    value_axis(axis, auto_extent(values, Stacking::None, rules), opposite)
}
