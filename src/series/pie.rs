//! Pie slices and "Others" convolution.

use super::{BuildContext, FamilyOutput, is_numeric};
use crate::axis::continuous::format_date_category;
use crate::chart::tooltip::{FormatConfig, PointContext, PointValues, Share, format_point};
use crate::chart::types::{Drilldown, PointCustom, PointOutput, SeriesOutput};
use crate::limits::{Alert, limit_series_data};
use crate::models::{CellValue, Point, SeriesChartData, XValue};
use crate::options::{Column, ColorRule, ColumnType, ConvolutionMode, ConvolutionOptions};
use crate::style::{self, OTHERS_COLOR, ValueExtent};

/// Drilldown id of the aggregated slice.
pub const OTHERS_ID: &str = "others";

/// A resolved categorical slice, shared by pie and funnel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub name: String,
    pub value: f64,
    pub raw_value: Option<CellValue>,
    pub color: String,
    pub blur: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceSet {
    pub series_name: String,
    pub slices: Vec<Slice>,
    pub alerts: Vec<Alert>,
}

fn slice_label(x: &XValue, column: Option<&Column>) -> String {
    let parts = x.x_display_values.as_ref().unwrap_or(&x.x_values);
    if parts.len() == 1
        && let Some(col) = column.filter(|c| c.data_type == ColumnType::Datetime)
        && let Some(label) = format_date_category(&parts[0], col.granularity.unwrap_or_default())
    {
        return label;
    }
    parts.join(" / ")
}

/// Limit the data and turn it into colored slices: one per category, or one per
/// measure when there is no category. Gap values are dropped.
pub fn collect_slices(data: &SeriesChartData, ctx: &BuildContext) -> SliceSet {
    let opts = ctx.data_options;
    let (data, alerts) = limit_series_data(data, ctx.design.data_limits);

    let mut raw: Vec<(String, &Point)> = Vec::new();
    let (series_name, numeric_keys) = if data.x_values.is_empty() {
        for s in &data.series {
            if let Some(p) = s.data.first() {
                raw.push((s.display_name().to_string(), p));
            }
        }
        (String::new(), false)
    } else {
        let category = opts.category.first();
        match data.series.first() {
            Some(s) => {
                for (i, x) in data.x_values.iter().enumerate() {
                    if let Some(p) = s.data.get(i) {
                        raw.push((slice_label(x, category), p));
                    }
                }
                (s.display_name().to_string(), is_numeric(category))
            }
            None => (String::new(), false),
        }
    };
    raw.retain(|(_, p)| p.value.is_finite());

    let resolver = ctx.resolver();
    let rule = opts.value.first().and_then(|c| c.color.as_ref());
    let keys: Vec<String> = raw.iter().map(|(n, _)| n.clone()).collect();
    let assigned = resolver.assign(&keys, numeric_keys, rule);
    let point_rule = rule.filter(|r| !matches!(r, ColorRule::Uniform { .. }));
    let extent = ValueExtent::of(raw.iter().map(|(_, p)| p.value));

    let slices = raw
        .into_iter()
        .map(|(name, p)| {
            let base = resolver
                .point_color(p, &name, point_rule, extent)
                .or_else(|| assigned.get(&name).cloned())
                .unwrap_or_else(|| resolver.primary());
            Slice {
                color: if p.blur { style::blur(&base) } else { base },
                value: p.value,
                raw_value: p.raw_value.clone(),
                blur: p.blur,
                name,
            }
        })
        .collect();

    SliceSet {
        series_name,
        slices,
        alerts,
    }
}

/// Split slice indices into (kept, folded into "Others"). Kept slices stay in input
/// order; a tail of a single slice is never folded.
pub fn convolve(slices: &[Slice], options: &ConvolutionOptions, total: f64) -> (Vec<usize>, Vec<usize>) {
    let all: Vec<usize> = (0..slices.len()).collect();
    if !options.enabled || slices.len() < 2 {
        return (all, Vec::new());
    }

    let keep: Vec<bool> = match options.mode {
        ConvolutionMode::ByPercentage => slices
            .iter()
            .map(|s| total > 0.0 && s.value / total * 100.0 >= options.minimal_independent_slice_percentage)
            .collect(),
        ConvolutionMode::BySlicesCount => {
            let mut order = all.clone();
            // Stable: equal values keep their input order.
            order.sort_by(|a, b| slices[*b].value.total_cmp(&slices[*a].value));
            let mut keep = vec![false; slices.len()];
            for i in order.into_iter().take(options.independent_slices_count) {
                keep[i] = true;
            }
            keep
        }
    };

    let (kept, folded): (Vec<usize>, Vec<usize>) = all.into_iter().partition(|i| keep[*i]);
    if folded.len() < 2 {
        return ((0..slices.len()).collect(), Vec::new());
    }
    (kept, folded)
}

/// Share of the positive total, in percent.
pub fn share_of(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total * 100.0 } else { 0.0 }
}

fn slice_point(slice: &Slice, series_name: &str, total: f64, fmt: &FormatConfig) -> PointOutput {
    let percent = share_of(slice.value, total);
    let tip = PointContext::new(series_name, PointValues::Value(slice.value))
        .with_category(&slice.name)
        .with_share(Share::OfTotal(percent));
    PointOutput {
        name: Some(slice.name.clone()),
        y: Some(Some(slice.value)),
        color: Some(slice.color.clone()),
        custom: Some(PointCustom {
            raw_value: slice.raw_value.clone(),
            percent: Some(percent),
            blur: slice.blur,
            tooltip: Some(format_point(&tip, fmt)),
            ..PointCustom::default()
        }),
        ..PointOutput::default()
    }
}

pub fn build_pie(data: &SeriesChartData, ctx: &BuildContext) -> FamilyOutput {
    let set = collect_slices(data, ctx);
    let fmt = ctx.format_config(ctx.data_options.value.first());
    let total: f64 = set.slices.iter().map(|s| s.value).filter(|v| *v > 0.0).sum();
    let (kept, folded) = convolve(&set.slices, &ctx.design.pie.convolution, total);

    let mut points: Vec<PointOutput> = kept
        .iter()
        .map(|&i| slice_point(&set.slices[i], &set.series_name, total, &fmt))
        .collect();

    let mut drilldown = None;
    if !folded.is_empty() {
        let others_name = ctx.translate("chart.others");
        let others_value: f64 = folded.iter().map(|&i| set.slices[i].value).sum();
        let others = Slice {
            name: others_name.clone(),
            value: others_value,
            raw_value: None,
            color: OTHERS_COLOR.to_string(),
            blur: false,
        };
        let mut p = slice_point(&others, &set.series_name, total, &fmt);
        p.drilldown = Some(OTHERS_ID.to_string());
        points.push(p);

        drilldown = Some(Drilldown {
            series: vec![SeriesOutput {
                name: others_name,
                id: Some(OTHERS_ID.to_string()),
                data: folded
                    .iter()
                    .map(|&i| slice_point(&set.slices[i], &set.series_name, total, &fmt))
                    .collect(),
                ..SeriesOutput::default()
            }],
        });
    }

    FamilyOutput {
        series: vec![SeriesOutput {
            name: set.series_name,
            data: points,
            ..SeriesOutput::default()
        }],
        drilldown,
        alerts: set.alerts,
        ..FamilyOutput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(values: &[f64]) -> Vec<Slice> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Slice {
                name: format!("s{i}"),
                value: *v,
                raw_value: None,
                color: "#000000".into(),
                blur: false,
            })
            .collect()
    }

    fn conv(mode: ConvolutionMode) -> ConvolutionOptions {
        ConvolutionOptions {
            enabled: true,
            mode,
            minimal_independent_slice_percentage: 12.0,
            independent_slices_count: 2,
        }
    }

    #[test]
    fn by_percentage_folds_small_slices() {
        let s = slices(&[60.0, 25.0, 10.0, 5.0]);
        let (kept, folded) = convolve(&s, &conv(ConvolutionMode::ByPercentage), 100.0);
        assert_eq!(kept, vec![0, 1]);
        assert_eq!(folded, vec![2, 3]);
    }

    #[test]
    fn by_count_keeps_top_n_in_input_order() {
        let s = slices(&[5.0, 60.0, 10.0, 25.0]);
        let (kept, folded) = convolve(&s, &conv(ConvolutionMode::BySlicesCount), 100.0);
        assert_eq!(kept, vec![1, 3]);
        assert_eq!(folded, vec![0, 2]);
    }

    #[test]
    fn single_slice_tail_is_not_folded() {
        let s = slices(&[60.0, 30.0, 10.0]);
        let (kept, folded) = convolve(&s, &conv(ConvolutionMode::ByPercentage), 100.0);
        assert_eq!(kept.len(), 3);
        assert!(folded.is_empty());
    }

    #[test]
    fn disabled_keeps_everything() {
        let s = slices(&[60.0, 25.0, 10.0, 5.0]);
        let (kept, folded) = convolve(&s, &ConvolutionOptions::default(), 100.0);
        assert_eq!(kept.len(), 4);
        assert!(folded.is_empty());
    }
}
