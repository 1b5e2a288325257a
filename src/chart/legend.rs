//! Legend placement.

use super::types::{HorizontalAlign, LegendLayout, LegendOutput, VerticalAlign};
use crate::options::{LegendOptions, LegendPosition};

/// Side legends stack vertically and center on the plot; top/bottom legends flow
/// horizontally.
pub fn build_legend(options: &LegendOptions) -> LegendOutput {
    let (align, vertical_align, layout) = match options.position {
        LegendPosition::Left => (
            HorizontalAlign::Left,
            VerticalAlign::Middle,
            LegendLayout::Vertical,
        ),
        LegendPosition::Right => (
            HorizontalAlign::Right,
            VerticalAlign::Middle,
            LegendLayout::Vertical,
        ),
        LegendPosition::Top => (
            HorizontalAlign::Center,
            VerticalAlign::Top,
            LegendLayout::Horizontal,
        ),
        LegendPosition::Bottom => (
            HorizontalAlign::Center,
            VerticalAlign::Bottom,
            LegendLayout::Horizontal,
        ),
    };
    LegendOutput {
        enabled: options.enabled,
        align,
        vertical_align,
        layout,
    }
}
