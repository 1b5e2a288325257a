//! Scatter and bubble series.

use ahash::AHashMap;
use std::collections::BTreeMap;

use super::{BuildContext, FamilyOutput, finite, number_format};
use crate::axis::{AxisExtent, ExtentRules, Stacking, finalize_extent};
use crate::chart::axes::{label_axis, value_axis};
use crate::chart::tooltip::{PointContext, PointValues, format_point};
use crate::chart::types::{AxisOutput, PointCustom, PointOutput, SeriesOutput};
use crate::limits::{Alert, LimitDimension, truncate};
use crate::models::{CellValue, ScatterChartData, ScatterRow};
use crate::options::{AxisOptions, Column, ColorRule, ColumnType};
use crate::style::{self, ValueExtent, rule_color, sorted_keys};

/// How one scatter dimension is plotted.
enum Dimension {
    Numeric,
    /// Text values on a category axis: sorted labels and their positions.
    Labels {
        labels: Vec<String>,
        position: AHashMap<String, usize>,
    },
}

impl Dimension {
    fn locate(&self, cell: Option<&CellValue>) -> Option<f64> {
        let cell = cell?;
        match self {
            Dimension::Numeric => cell.as_f64(),
            Dimension::Labels { position, .. } => position.get(&cell.to_string()).map(|p| *p as f64),
        }
    }

    fn label(&self, at: f64) -> Option<&str> {
        match self {
            Dimension::Numeric => None,
            Dimension::Labels { labels, .. } => labels.get(at as usize).map(String::as_str),
        }
    }
}

fn is_text(column: Option<&Column>, cells: &[Option<&CellValue>]) -> bool {
    match column {
        Some(c) => c.data_type == ColumnType::Text,
        None => cells.iter().flatten().any(|c| !c.is_numeric()),
    }
}

/// Decide numeric vs. category placement for one dimension; category labels are the
/// sorted distinct values, limited to `capacity`.
fn dimension(
    column: Option<&Column>,
    cells: Vec<Option<&CellValue>>,
    capacity: usize,
    limit: LimitDimension,
    alerts: &mut Vec<Alert>,
) -> Dimension {
    if !is_text(column, &cells) {
        return Dimension::Numeric;
    }
    let keys: Vec<String> = cells.iter().flatten().map(|c| c.to_string()).collect();
    let sorted = sorted_keys(&keys, false);
    let (kept, alert) = truncate(&sorted, capacity, limit);
    alerts.extend(alert);
    let labels = kept.to_vec();
    let position = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.clone(), i))
        .collect();
    Dimension::Labels { labels, position }
}

fn axis(dim: &Dimension, opts: &AxisOptions, values: &[f64]) -> AxisOutput {
    match dim {
        Dimension::Labels { labels, .. } => label_axis(labels.clone(), opts),
        Dimension::Numeric => {
            let raw = ValueExtent::of(values.iter().copied()).map(|e| AxisExtent {
                min: e.min,
                max: e.max,
            });
            let rules = ExtentRules {
                explicit_min: opts.min,
                explicit_max: opts.max,
                ..ExtentRules::default()
            };
            value_axis(opts, finalize_extent(raw, Stacking::None, rules), false)
        }
    }
}

/// Series grouping of the rows.
enum Grouping<'r> {
    Single,
    /// One series per distinct color-by value.
    ByValue { numeric: bool },
    /// One series, points colored by a rule over a numeric color-by value.
    ByRule(&'r ColorRule),
}

fn color_key(row: &ScatterRow) -> String {
    row.break_by_color
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default()
}

pub fn build_scatter(data: &ScatterChartData, ctx: &BuildContext) -> FamilyOutput {
    let opts = ctx.data_options;
    let design = ctx.design;
    let capacity = design.data_limits.categories_capacity;
    let mut alerts = Vec::new();

    // 1) axes: numeric or category per dimension
    let x_dim = dimension(
        opts.x.as_ref(),
        data.rows.iter().map(|r| r.x.as_ref()).collect(),
        capacity,
        LimitDimension::ScatterX,
        &mut alerts,
    );
    let y_dim = dimension(
        opts.y.as_ref(),
        data.rows.iter().map(|r| r.y.as_ref()).collect(),
        capacity,
        LimitDimension::ScatterY,
        &mut alerts,
    );

    // 2) grouping and series colors
    let color_by = opts.color_by.as_ref();
    let grouping = match color_by {
        None => Grouping::Single,
        Some(c) => match (&c.color, c.data_type) {
            (Some(rule), ColumnType::Numeric) => Grouping::ByRule(rule),
            (_, t) => Grouping::ByValue {
                numeric: t == ColumnType::Numeric,
            },
        },
    };
    let resolver = ctx.resolver();
    let single_name = opts
        .y
        .as_ref()
        .map(|c| c.display_name().to_string())
        .unwrap_or_default();
    let mut groups: Vec<String> = match grouping {
        Grouping::ByValue { numeric } => {
            let keys: Vec<String> = data.rows.iter().map(color_key).collect();
            sorted_keys(&keys, numeric)
        }
        Grouping::Single | Grouping::ByRule(_) => vec![single_name.clone()],
    };
    let (kept, alert) = truncate(&groups, design.data_limits.series_capacity, LimitDimension::Series);
    alerts.extend(alert);
    groups = kept.to_vec();
    let numeric_groups = matches!(grouping, Grouping::ByValue { numeric: true });
    let group_colors = resolver.assign(&groups, numeric_groups, None);
    let color_extent = ValueExtent::of(
        data.rows
            .iter()
            .filter_map(|r| r.break_by_color.as_ref().and_then(CellValue::as_f64)),
    );

    // 3) points
    let has_size = opts.size.is_some();
    let fmt = ctx
        .format_config(opts.y.as_ref())
        .with_x_format(number_format(opts.x.as_ref()))
        .with_size_format(number_format(opts.size.as_ref()));
    let mut buckets: BTreeMap<&str, Vec<PointOutput>> = BTreeMap::new();
    let (mut xs, mut ys) = (Vec::new(), Vec::new());
    for row in &data.rows {
        let (Some(x), Some(y)) = (x_dim.locate(row.x.as_ref()), y_dim.locate(row.y.as_ref())) else {
            continue;
        };
        let key = match grouping {
            Grouping::ByValue { .. } => color_key(row),
            Grouping::Single | Grouping::ByRule(_) => single_name.clone(),
        };
        let Some(group) = groups.iter().find(|g| **g == key) else {
            continue;
        };
        xs.push(x);
        ys.push(y);

        // Absent size plots as 1, a non-numeric one as null.
        let z = match &row.size {
            None => Some(1.0),
            Some(cell) => cell.as_f64(),
        };
        let mut color = match grouping {
            Grouping::ByRule(rule) => row
                .break_by_color
                .as_ref()
                .and_then(CellValue::as_f64)
                .and_then(|v| rule_color(rule, v, color_extent)),
            Grouping::Single | Grouping::ByValue { .. } => None,
        };
        if row.blur {
            let base = color
                .clone()
                .or_else(|| group_colors.get(group).cloned())
                .unwrap_or_else(|| resolver.primary());
            color = Some(style::blur(&base));
        }

        let mut tip = PointContext::new(
            group,
            PointValues::Xyz {
                x,
                y,
                z: if has_size { z } else { None },
            },
        );
        if let Some(label) = x_dim.label(x) {
            tip = tip.with_category(label);
        }
        if let Some(label) = y_dim.label(y) {
            tip = tip.with_y_category(label);
        }

        buckets.entry(group.as_str()).or_default().push(PointOutput {
            x: Some(x),
            y: Some(finite(y)),
            z: Some(z),
            name: row.break_by_point.clone(),
            color,
            custom: Some(PointCustom {
                raw_value: row.y.clone(),
                blur: row.blur,
                tooltip: Some(format_point(&tip, &fmt)),
                ..PointCustom::default()
            }),
            ..PointOutput::default()
        });
    }

    let series = groups
        .iter()
        .map(|g| SeriesOutput {
            name: g.clone(),
            data: buckets.remove(g.as_str()).unwrap_or_default(),
            color: group_colors.get(g).cloned(),
            ..SeriesOutput::default()
        })
        .collect();

    FamilyOutput {
        x_axis: vec![axis(&x_dim, &design.x_axis, &xs)],
        y_axis: vec![axis(&y_dim, &design.y_axis, &ys)],
        series,
        alerts,
        ..FamilyOutput::default()
    }
}

/// Renderer chart type: bubbles when a size column is bound.
pub fn scatter_chart_type(ctx: &BuildContext) -> &'static str {
    if ctx.data_options.size.is_some() {
        "bubble"
    } else {
        "scatter"
    }
}
