//! Box-and-whisker series with linked outliers.

use super::{BuildContext, FamilyOutput, finite};
use crate::axis::{AxisExtent, ExtentRules, Stacking, build_layout, finalize_extent};
use crate::chart::axes::{category_axis, value_axis};
use crate::chart::plot_options::series_marker;
use crate::chart::tooltip::{PointContext, PointValues, format_point};
use crate::chart::types::{PointCustom, PointOutput, SeriesOutput};
use crate::limits::limit_categories;
use crate::models::{BoxSummary, BoxplotChartData, XValue};
use crate::options::BoxType;
use crate::style::{self, ValueExtent};

/// Id of the box series; the outlier series links to it.
pub const BOXES_ID: &str = "boxes";

fn box_values(b: &BoxSummary) -> [f64; 5] {
    [b.low, b.q1, b.median, b.q3, b.high]
}

pub fn build_boxplot(data: &BoxplotChartData, ctx: &BuildContext) -> FamilyOutput {
    let design = ctx.design;
    let opts = ctx.data_options;
    let capacity = design.data_limits.categories_capacity;

    // 1) limit categories and re-index boxes
    let (kept, alerts) = limit_categories(&data.x_values, data.x_axis_count, capacity);
    let x_values: Vec<XValue> = kept.iter().map(|&i| data.x_values[i].clone()).collect();
    let boxes: Vec<Option<&BoxSummary>> = kept.iter().map(|&i| data.boxes.get(i)).collect();
    let layout = build_layout(&x_values, data.x_axis_count, opts, capacity);

    let value_column = opts.value.first();
    let name = value_column
        .map(|c| c.display_name().to_string())
        .unwrap_or_default();
    let resolver = ctx.resolver();
    let color = resolver
        .explicit_color(&name)
        .unwrap_or_else(|| resolver.primary());
    let fmt = ctx.format_config(value_column);

    // 2) one point per tick; empty boxes and separators plot nothing
    let points: Vec<PointOutput> = layout
        .ticks
        .iter()
        .enumerate()
        .map(|(pos, tick)| {
            let x = layout.tick_values.as_ref().map(|tv| tv[pos]);
            let Some(b) = tick
                .data_index()
                .and_then(|i| boxes.get(i).copied().flatten())
                .filter(|b| !b.is_empty())
            else {
                return PointOutput {
                    x,
                    y: Some(None),
                    ..PointOutput::default()
                };
            };
            let label = layout.categories[pos].as_str();
            let tip = PointContext::new(
                &name,
                PointValues::Box {
                    low: b.low,
                    q1: b.q1,
                    median: b.median,
                    q3: b.q3,
                    high: b.high,
                },
            )
            .with_category(label);
            PointOutput {
                x,
                low: finite(b.low),
                q1: finite(b.q1),
                median: finite(b.median),
                q3: finite(b.q3),
                high: finite(b.high),
                color: b.blur.then(|| style::blur(&color)),
                custom: Some(PointCustom {
                    x_display_value: Some(label.to_string()),
                    blur: b.blur,
                    tooltip: Some(format_point(&tip, &fmt)),
                    ..PointCustom::default()
                }),
                ..PointOutput::default()
            }
        })
        .collect();

    let mut series = vec![SeriesOutput {
        name: name.clone(),
        data: points,
        color: Some(color.clone()),
        id: Some(BOXES_ID.to_string()),
        fill_color: (design.boxplot.box_type == BoxType::Hollow).then(|| "transparent".to_string()),
        ..SeriesOutput::default()
    }];

    // 3) outliers, moved from their raw category to its tick position
    let mut extent_values: Vec<f64> = boxes.iter().flatten().flat_map(|b| box_values(b)).collect();
    if design.boxplot.outliers_enabled {
        let mut marker = series_marker(design);
        marker.enabled = true;
        let outliers: Vec<PointOutput> = data
            .outliers
            .iter()
            .filter(|o| o.value.is_finite())
            .filter_map(|o| {
                let at = kept.iter().position(|&k| k == o.x)?;
                let pos = layout.position_of(at)?;
                extent_values.push(o.value);
                let label = layout.categories[pos].as_str();
                let tip = PointContext::new(&name, PointValues::Value(o.value)).with_category(label);
                Some(PointOutput {
                    x: Some(
                        layout
                            .tick_values
                            .as_ref()
                            .map(|tv| tv[pos])
                            .unwrap_or(pos as f64),
                    ),
                    y: Some(Some(o.value)),
                    color: o.blur.then(|| style::blur(&color)),
                    custom: Some(PointCustom {
                        x_display_value: Some(label.to_string()),
                        blur: o.blur,
                        tooltip: Some(format_point(&tip, &fmt)),
                        ..PointCustom::default()
                    }),
                    ..PointOutput::default()
                })
            })
            .collect();
        series.push(SeriesOutput {
            name: ctx.translate("chart.outliers"),
            series_type: Some("scatter".to_string()),
            data: outliers,
            color: Some(color),
            linked_to: Some(BOXES_ID.to_string()),
            marker: Some(marker),
            ..SeriesOutput::default()
        });
    }

    // 4) value axis over whiskers and outliers
    let raw = ValueExtent::of(extent_values).map(|e| AxisExtent {
        min: e.min,
        max: e.max,
    });
    let rules = ExtentRules {
        explicit_min: design.y_axis.min,
        explicit_max: design.y_axis.max,
        ..ExtentRules::default()
    };

    FamilyOutput {
        x_axis: vec![category_axis(&layout, &design.x_axis)],
        y_axis: vec![value_axis(
            &design.y_axis,
            finalize_extent(raw, Stacking::None, rules),
            false,
        )],
        series,
        alerts,
        ..FamilyOutput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartType, OutlierPoint};
    use crate::options::{BoxplotOptions, DataOptions, DesignOptions};
    use crate::translate::DefaultTranslator;

    fn data() -> BoxplotChartData {
        BoxplotChartData {
            x_values: vec![XValue::new(&["a"]), XValue::new(&["b"]), XValue::new(&["c"])],
            x_axis_count: 1,
            boxes: vec![
                BoxSummary::new(1.0, 2.0, 3.0, 4.0, 5.0),
                BoxSummary::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN),
                BoxSummary::new(2.0, 3.0, 4.0, 5.0, 6.0),
            ],
            outliers: vec![
                OutlierPoint {
                    x: 2,
                    value: 12.0,
                    blur: false,
                },
                OutlierPoint {
                    x: 0,
                    value: -3.0,
                    blur: false,
                },
            ],
        }
    }

    fn build(design: &DesignOptions) -> FamilyOutput {
        let opts = DataOptions::default();
        let ctx = BuildContext {
            chart_type: ChartType::Boxplot,
            data_options: &opts,
            design,
            translator: &DefaultTranslator,
            locale: "en",
        };
        build_boxplot(&data(), &ctx)
    }

    #[test]
    fn boxes_and_linked_outliers() {
        let out = build(&DesignOptions::for_chart_type(ChartType::Boxplot));
        assert_eq!(out.series.len(), 2);
        let boxes = &out.series[0];
        assert_eq!(boxes.id.as_deref(), Some(BOXES_ID));
        assert_eq!(boxes.data[0].median, Some(3.0));
        assert_eq!(boxes.data[1].y, Some(None));
        assert!(boxes.data[1].median.is_none());

        let outliers = &out.series[1];
        assert_eq!(outliers.linked_to.as_deref(), Some(BOXES_ID));
        assert_eq!(outliers.color, boxes.color);
        assert_eq!(outliers.data[0].x, Some(2.0));

        assert_eq!(out.y_axis[0].min, Some(-3.0));
        assert_eq!(out.y_axis[0].max, Some(12.0));
    }

    #[test]
    fn outliers_disabled_and_hollow() {
        let design = DesignOptions::for_chart_type(ChartType::Boxplot).with_boxplot(BoxplotOptions {
            box_type: BoxType::Hollow,
            outliers_enabled: false,
        });
        let out = build(&design);
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series[0].fill_color.as_deref(), Some("transparent"));
        assert_eq!(out.y_axis[0].max, Some(6.0));
    }

    #[test]
    fn dropped_category_drops_its_outliers() {
        let design = DesignOptions::for_chart_type(ChartType::Boxplot).with_data_limits(50, 2);
        let out = build(&design);
        assert_eq!(out.series[0].data.len(), 2);
        assert_eq!(out.series[1].data.len(), 1);
        assert_eq!(out.alerts.len(), 1);
    }
}
