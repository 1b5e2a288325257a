//! Funnel stages and geometry.

use serde::{Deserialize, Serialize};

use super::pie::collect_slices;
use super::{BuildContext, FamilyOutput};
use crate::chart::tooltip::{PointContext, PointValues, Share, format_point};
use crate::chart::types::{FunnelPlotOptions, PointCustom, PointOutput, SeriesOutput};
use crate::models::SeriesChartData;
use crate::options::{ContainerSize, FunnelDirection, FunnelOptions, FunnelType, SortType};

/// Widest funnel, in percent of the plot width.
pub const MAX_WIDTH_PERCENT: f64 = 60.0;
/// Funnel height relative to its width.
pub const HEIGHT_TO_WIDTH_COEFFICIENT: f64 = 1.2;
/// Neck height of a pinched funnel, in percent.
pub const PINCHED_NECK_HEIGHT: f64 = 30.0;

/// Funnel shape in percentages of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelGeometry {
    pub width: f64,
    pub neck_width: f64,
    pub neck_height: f64,
    pub reversed: bool,
}

impl FunnelGeometry {
    pub fn plot_options(&self) -> FunnelPlotOptions {
        FunnelPlotOptions {
            width: format!("{}%", self.width),
            neck_width: format!("{}%", self.neck_width),
            neck_height: format!("{}%", self.neck_height),
            reversed: self.reversed,
        }
    }
}

/// Width follows the container aspect ratio, capped at [`MAX_WIDTH_PERCENT`]; an
/// unmeasured container gets the maximum.
pub fn funnel_width(container: Option<ContainerSize>) -> f64 {
    match container {
        Some(c) if c.width > 0.0 && c.height > 0.0 => {
            (c.height * HEIGHT_TO_WIDTH_COEFFICIENT / c.width * 100.0).min(MAX_WIDTH_PERCENT)
        }
        _ => MAX_WIDTH_PERCENT,
    }
}

pub fn funnel_geometry(options: &FunnelOptions, width: f64) -> FunnelGeometry {
    FunnelGeometry {
        width,
        neck_width: (width * options.size.neck_factor() / 100.0).round(),
        neck_height: match options.funnel_type {
            FunnelType::Pinched => PINCHED_NECK_HEIGHT,
            FunnelType::Regular => 0.0,
        },
        reversed: options.direction == FunnelDirection::Inverted,
    }
}

pub fn build_funnel(data: &SeriesChartData, ctx: &BuildContext) -> FamilyOutput {
    let value_column = ctx.data_options.value.first();
    let mut set = collect_slices(data, ctx);
    match value_column.and_then(|c| c.sort_type) {
        Some(SortType::Asc) => set.slices.sort_by(|a, b| a.value.total_cmp(&b.value)),
        Some(SortType::Desc) => set.slices.sort_by(|a, b| b.value.total_cmp(&a.value)),
        None => {}
    }

    let fmt = ctx.format_config(value_column);
    let first = set.slices.first().map(|s| s.value).filter(|v| *v != 0.0);
    let points = set
        .slices
        .iter()
        .map(|slice| {
            let percent = first.map(|f| slice.value / f * 100.0);
            let mut tip = PointContext::new(&set.series_name, PointValues::Value(slice.value))
                .with_category(&slice.name);
            if let Some(p) = percent {
                tip = tip.with_share(Share::OfFirstStage(p));
            }
            PointOutput {
                name: Some(slice.name.clone()),
                y: Some(Some(slice.value)),
                color: Some(slice.color.clone()),
                custom: Some(PointCustom {
                    raw_value: slice.raw_value.clone(),
                    percent,
                    blur: slice.blur,
                    tooltip: Some(format_point(&tip, &fmt)),
                    ..PointCustom::default()
                }),
                ..PointOutput::default()
            }
        })
        .collect();

    let geometry = funnel_geometry(&ctx.design.funnel, funnel_width(ctx.design.container));

    FamilyOutput {
        series: vec![SeriesOutput {
            name: set.series_name.clone(),
            data: points,
            ..SeriesOutput::default()
        }],
        funnel: Some(geometry),
        alerts: set.alerts,
        ..FamilyOutput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FunnelSize;

    #[test]
    fn wide_neck_of_full_width_funnel() {
        let opts = FunnelOptions {
            size: FunnelSize::Wide,
            ..FunnelOptions::default()
        };
        let g = funnel_geometry(&opts, 60.0);
        assert_eq!(g.neck_width, 36.0);
        assert_eq!(g.neck_height, 0.0);
        assert!(!g.reversed);
    }

    #[test]
    fn width_follows_container() {
        assert_eq!(funnel_width(None), MAX_WIDTH_PERCENT);
        let w = funnel_width(Some(ContainerSize {
            width: 1000.0,
            height: 400.0,
        }));
        assert!((w - 48.0).abs() < 1e-9);
        let tall = funnel_width(Some(ContainerSize {
            width: 300.0,
            height: 900.0,
        }));
        assert_eq!(tall, MAX_WIDTH_PERCENT);
    }

    #[test]
    fn pinched_and_inverted() {
        let opts = FunnelOptions {
            size: FunnelSize::Narrow,
            funnel_type: FunnelType::Pinched,
            direction: FunnelDirection::Inverted,
        };
        let g = funnel_geometry(&opts, 60.0);
        assert_eq!(g.neck_width, 9.0);
        assert_eq!(g.neck_height, 30.0);
        assert!(g.reversed);
        assert_eq!(g.plot_options().neck_width, "9%");
    }
}
