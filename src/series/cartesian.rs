//! Line, area, bar, column and polar series.
//!
//! Pipeline:
//! 1) limit series and categories
//! 2) lay out the category axis (index map, plot bands, continuous gaps)
//! 3) resolve series colors, then per-point overrides
//! 4) map every series through the ticks, applying the null-as-zero policy
//! 5) compute per-side value extents and emit axes

use super::{BuildContext, FamilyOutput, finite, is_numeric, isolated_flags};
use crate::axis::{AxisLayout, ExtentRules, Stacking, Tick, auto_extent, build_layout};
use crate::chart::axes::{category_axis, value_axis};
use crate::chart::plot_options::{clamps_to_zero, stacking_for};
use crate::chart::tooltip::{PointContext, PointValues, format_point};
use crate::chart::types::{PointCustom, PointMarker, PointOutput, SeriesOutput};
use crate::limits::{Alert, limit_series_data};
use crate::models::{ChartType, SeriesChartData};
use crate::options::{AxisOptions, ColorRule, DesignOptions, PolarType};
use crate::style::{self, ValueExtent, rule_color};

/// One series mapped onto the category ticks, before it becomes a [`SeriesOutput`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub name: String,
    pub color: String,
    /// Plotted value per tick; `NaN` where the renderer gets `null`.
    pub values: Vec<f64>,
    pub points: Vec<PointOutput>,
    pub right_axis: bool,
    pub type_override: Option<String>,
}

impl PlottedSeries {
    pub fn into_output(self) -> SeriesOutput {
        SeriesOutput {
            name: self.name,
            series_type: self.type_override,
            data: self.points,
            color: Some(self.color),
            y_axis: self.right_axis.then_some(1),
            ..SeriesOutput::default()
        }
    }
}

/// Limited data laid out on the category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPlan {
    pub layout: AxisLayout,
    pub series: Vec<PlottedSeries>,
    pub alerts: Vec<Alert>,
}

/// Renderer series type a chart type draws by default.
pub fn default_series_type(chart_type: ChartType, design: &DesignOptions) -> &'static str {
    match chart_type {
        ChartType::Polar => match design.polar.polar_type {
            PolarType::Column => "column",
            PolarType::Area => "area",
            PolarType::Line => "line",
        },
        other => other.as_str(),
    }
}

fn is_line_like(series_type: &str) -> bool {
    matches!(series_type, "line" | "spline" | "area" | "arearange")
}

fn uniform_color(rule: Option<&ColorRule>) -> Option<String> {
    match rule {
        Some(r @ ColorRule::Uniform { .. }) => rule_color(r, 0.0, None),
        _ => None,
    }
}

/// Steps 1–4 of the pipeline. Shared with the range builder.
pub fn plan(data: &SeriesChartData, ctx: &BuildContext) -> CartesianPlan {
    let design = ctx.design;
    let opts = ctx.data_options;

    let (data, alerts) = limit_series_data(data, design.data_limits);
    let layout = build_layout(
        &data.x_values,
        data.x_axis_count,
        opts,
        design.data_limits.categories_capacity,
    );

    let resolver = ctx.resolver();
    let keys: Vec<String> = data.series.iter().map(|s| s.name.clone()).collect();
    let shared_rule = opts
        .break_by
        .as_ref()
        .and(opts.value.first())
        .and_then(|c| c.color.as_ref());
    let palette_colors = resolver.assign(&keys, is_numeric(opts.break_by.as_ref()), shared_rule);
    let default_type = default_series_type(ctx.chart_type, design);

    let mut series = Vec::with_capacity(data.series.len());
    for (idx, s) in data.series.iter().enumerate() {
        let column = opts.value_column(idx, &s.name);
        let rule = column.and_then(|c| c.color.as_ref());
        let explicit = resolver.explicit_color(&s.name);
        let color = explicit
            .clone()
            .or_else(|| uniform_color(rule))
            .or_else(|| palette_colors.get(&s.name).cloned())
            .unwrap_or_else(|| resolver.primary());

        // The explicit series color outranks value-driven rules.
        let point_rule = rule.filter(|r| explicit.is_none() && !matches!(r, ColorRule::Uniform { .. }));
        let extent = ValueExtent::of(s.data.iter().map(|p| p.value));

        let nulls_as_zeros = column.is_some_and(|c| c.treat_null_data_as_zeros);
        let type_override = if opts.has_multiple_measures() {
            column
                .and_then(|c| c.chart_type)
                .map(|t| t.as_str().to_string())
        } else {
            None
        };
        let effective_type = type_override.as_deref().unwrap_or(default_type);

        let values: Vec<f64> = layout
            .ticks
            .iter()
            .map(|tick| match tick {
                Tick::Data(i) => {
                    let v = s.data.get(*i).map(|p| p.value).unwrap_or(f64::NAN);
                    if !v.is_finite() && nulls_as_zeros { 0.0 } else { v }
                }
                Tick::Gap if nulls_as_zeros => 0.0,
                Tick::Gap | Tick::Separator => f64::NAN,
            })
            .collect();
        let isolated = if is_line_like(effective_type) {
            isolated_flags(&values)
        } else {
            vec![false; values.len()]
        };

        let fmt = ctx.format_config(column);
        let display_name = s.display_name();
        let points = layout
            .ticks
            .iter()
            .enumerate()
            .map(|(pos, tick)| {
                let mut p = PointOutput {
                    x: layout.tick_values.as_ref().map(|tv| tv[pos]),
                    y: Some(finite(values[pos])),
                    ..PointOutput::default()
                };
                if isolated[pos] {
                    p.marker = Some(PointMarker::isolated());
                }
                if let Tick::Data(i) = tick
                    && let Some(src) = s.data.get(*i)
                {
                    let own = resolver
                        .point_color(src, &s.name, point_rule, extent)
                        .filter(|c| *c != color);
                    p.color = if src.blur {
                        Some(style::blur(own.as_deref().unwrap_or(&color)))
                    } else {
                        own
                    };
                    let label = layout.categories[pos].as_str();
                    let tip = PointContext::new(display_name, PointValues::Value(values[pos]))
                        .with_category(label);
                    p.custom = Some(PointCustom {
                        raw_value: src.raw_value.clone(),
                        x_display_value: Some(label.to_string()),
                        blur: src.blur,
                        tooltip: Some(format_point(&tip, &fmt)),
                        ..PointCustom::default()
                    });
                }
                p
            })
            .collect();

        series.push(PlottedSeries {
            name: display_name.to_string(),
            color,
            values,
            points,
            right_axis: column.is_some_and(|c| c.show_on_right_axis),
            type_override,
        });
    }

    CartesianPlan {
        layout,
        series,
        alerts,
    }
}

pub fn extent_rules(chart_type: ChartType, design: &DesignOptions, axis: &AxisOptions) -> ExtentRules {
    ExtentRules {
        explicit_min: axis.min,
        explicit_max: axis.max,
        clamp_to_zero: clamps_to_zero(chart_type, design),
        value_labels: design.value_labels.enabled,
    }
}

fn side_extent(
    series: &[PlottedSeries],
    right: bool,
    stacking: Stacking,
    rules: ExtentRules,
) -> (Option<f64>, Option<f64>) {
    let side: Vec<&[f64]> = series
        .iter()
        .filter(|s| s.right_axis == right)
        .map(|s| s.values.as_slice())
        .collect();
    auto_extent(&side, stacking, rules)
}

pub fn build_cartesian(data: &SeriesChartData, ctx: &BuildContext) -> FamilyOutput {
    let design = ctx.design;
    let plan = plan(data, ctx);
    let stacking = stacking_for(ctx.chart_type, design);

    let mut y_axis = vec![value_axis(
        &design.y_axis,
        side_extent(
            &plan.series,
            false,
            stacking,
            extent_rules(ctx.chart_type, design, &design.y_axis),
        ),
        false,
    )];
    if plan.series.iter().any(|s| s.right_axis) {
        y_axis.push(value_axis(
            &design.y2_axis,
            side_extent(
                &plan.series,
                true,
                stacking,
                extent_rules(ctx.chart_type, design, &design.y2_axis),
            ),
            true,
        ));
    }

    FamilyOutput {
        x_axis: vec![category_axis(&plan.layout, &design.x_axis)],
        y_axis,
        series: plan.series.into_iter().map(PlottedSeries::into_output).collect(),
        alerts: plan.alerts,
        ..FamilyOutput::default()
    }
}
