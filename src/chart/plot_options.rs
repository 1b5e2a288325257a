//! Shared plot options derived from the design record.

use super::types::{
    BoxplotPlotOptions, BubblePlotOptions, DataLabelsOutput, MarkerOutput, PiePlotOptions,
    PlotOptions, SeriesPlotOptions, StackingOutput,
};
use crate::axis::Stacking;
use crate::models::ChartType;
use crate::options::{BoxType, DesignOptions, MarkerFill, PieType, PolarType, StackType};

/// Stacking mode in effect. Line-like charts never stack; polar charts stack only
/// as columns or areas.
pub fn stacking_for(chart_type: ChartType, design: &DesignOptions) -> Stacking {
    let stackable = match chart_type {
        ChartType::Column | ChartType::Bar | ChartType::Area => true,
        ChartType::Polar => matches!(
            design.polar.polar_type,
            PolarType::Column | PolarType::Area
        ),
        _ => false,
    };
    if !stackable {
        return Stacking::None;
    }
    match design.stack_type {
        StackType::Classic => Stacking::None,
        StackType::Stacked => Stacking::Normal,
        StackType::Stack100 => Stacking::Percent,
    }
}

/// Column and bar value axes start at zero.
pub fn clamps_to_zero(chart_type: ChartType, design: &DesignOptions) -> bool {
    match chart_type {
        ChartType::Column | ChartType::Bar => true,
        ChartType::Polar => design.polar.polar_type == PolarType::Column,
        _ => false,
    }
}

fn draws_lines(chart_type: ChartType, design: &DesignOptions) -> bool {
    match chart_type {
        ChartType::Line | ChartType::Area | ChartType::Arearange => true,
        ChartType::Polar => design.polar.polar_type != PolarType::Column,
        _ => false,
    }
}

pub fn series_marker(design: &DesignOptions) -> MarkerOutput {
    let hollow = design.marker.fill == MarkerFill::Hollow;
    MarkerOutput {
        enabled: design.marker.enabled,
        radius: Some(design.marker.size.radius()),
        fill_color: hollow.then(|| "#FFFFFF".to_string()),
        line_width: hollow.then_some(2.0),
    }
}

pub fn pie_inner_size(pie_type: PieType) -> &'static str {
    match pie_type {
        PieType::Classic => "0%",
        PieType::Donut => "40%",
        PieType::Ring => "80%",
    }
}

pub fn build_plot_options(chart_type: ChartType, design: &DesignOptions) -> PlotOptions {
    let stacking = match stacking_for(chart_type, design) {
        Stacking::None => None,
        Stacking::Normal => Some(StackingOutput::Normal),
        Stacking::Percent => Some(StackingOutput::Percent),
    };
    let labels = &design.value_labels;
    let shows_share = matches!(chart_type, ChartType::Pie | ChartType::Funnel);

    let series = SeriesPlotOptions {
        stacking,
        marker: series_marker(design),
        line_width: draws_lines(chart_type, design).then(|| design.line_width.px()),
        data_labels: DataLabelsOutput {
            enabled: labels.enabled,
            rotation: Some(labels.rotation).filter(|r| *r != 0.0),
            show_percentage: shows_share && labels.show_percentage,
        },
        connect_nulls: false,
    };

    PlotOptions {
        series,
        pie: (chart_type == ChartType::Pie).then(|| PiePlotOptions {
            inner_size: pie_inner_size(design.pie.pie_type).to_string(),
            show_in_legend: design.legend.enabled,
        }),
        // Funnel geometry depends on the data and is filled in by the assembler.
        funnel: None,
        bubble: (chart_type == ChartType::Scatter).then(|| BubblePlotOptions {
            min_size: design.scatter.min_bubble_size,
            max_size: design.scatter.max_bubble_size,
        }),
        boxplot: (chart_type == ChartType::Boxplot).then(|| BoxplotPlotOptions {
            fill_color: (design.boxplot.box_type == BoxType::Hollow)
                .then(|| "transparent".to_string()),
        }),
    }
}
