//! Treemap and sunburst nodes from multi-level categories.

use ahash::AHashMap;

use super::{BuildContext, FamilyOutput};
use crate::chart::tooltip::{PointContext, PointValues, format_point};
use crate::chart::types::{PointCustom, PointOutput, SeriesOutput};
use crate::limits::limit_series_data;
use crate::models::{ChartType, SeriesChartData};
use crate::style;

/// Id of the sunburst center node.
pub const ROOT_ID: &str = "root";

/// Path labels joined with `_`. Backslashes and underscores inside a label are
/// escaped, so distinct paths never share an id.
fn node_id(path: &[String]) -> String {
    path.iter()
        .map(|label| label.replace('\\', "\\\\").replace('_', "\\_"))
        .collect::<Vec<_>>()
        .join("_")
}

/// One node per distinct category path prefix. Leaves carry the value; repeated leaf
/// paths are summed. Top-level nodes take palette colors in sorted order.
pub fn build_hierarchy(data: &SeriesChartData, ctx: &BuildContext) -> FamilyOutput {
    // Levels here are tree depth, not category axes.
    let flat = SeriesChartData {
        x_axis_count: 1,
        ..data.clone()
    };
    let (data, alerts) = limit_series_data(&flat, ctx.design.data_limits);
    let sunburst = ctx.chart_type == ChartType::Sunburst;
    let Some(series) = data.series.first() else {
        return FamilyOutput {
            alerts,
            ..FamilyOutput::default()
        };
    };

    let mut nodes: Vec<PointOutput> = Vec::new();
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut leaf_paths: Vec<(usize, String)> = Vec::new();
    if sunburst {
        nodes.push(PointOutput {
            id: Some(ROOT_ID.to_string()),
            name: Some(ctx.translate("chart.total")),
            ..PointOutput::default()
        });
    }

    for (i, x) in data.x_values.iter().enumerate() {
        let Some(point) = series.data.get(i).filter(|p| p.value.is_finite()) else {
            continue;
        };
        let labels = x.x_display_values.as_ref().unwrap_or(&x.x_values);
        let depth = x.x_values.len();
        for level in 0..depth {
            let id = node_id(&x.x_values[..=level]);
            let leaf = level + 1 == depth;
            if let Some(&at) = index.get(&id) {
                if leaf {
                    let node = &mut nodes[at];
                    node.value = Some(node.value.unwrap_or(0.0) + point.value);
                }
                continue;
            }
            let parent = if level == 0 {
                sunburst.then(|| ROOT_ID.to_string())
            } else {
                Some(node_id(&x.x_values[..level]))
            };
            let mut node = PointOutput {
                id: Some(id.clone()),
                name: Some(labels.get(level).unwrap_or(&x.x_values[level]).clone()),
                parent,
                ..PointOutput::default()
            };
            if leaf {
                let path: Vec<&str> = (0..depth)
                    .map(|l| labels.get(l).unwrap_or(&x.x_values[l]).as_str())
                    .collect();
                leaf_paths.push((nodes.len(), path.join(" / ")));
                node.value = Some(point.value);
                node.custom = Some(PointCustom {
                    raw_value: point.raw_value.clone(),
                    blur: point.blur,
                    ..PointCustom::default()
                });
            }
            index.insert(id, nodes.len());
            nodes.push(node);
        }
    }

    // Top-level colors.
    let resolver = ctx.resolver();
    let top: Vec<String> = nodes
        .iter()
        .filter(|n| n.parent.is_none() || n.parent.as_deref() == Some(ROOT_ID))
        .filter(|n| n.id.as_deref() != Some(ROOT_ID))
        .filter_map(|n| n.name.clone())
        .collect();
    let colors = resolver.assign(&top, false, None);
    for node in nodes.iter_mut() {
        let is_top = node.id.as_deref() != Some(ROOT_ID)
            && (node.parent.is_none() || node.parent.as_deref() == Some(ROOT_ID));
        if is_top {
            node.color = node.name.as_ref().and_then(|n| colors.get(n)).cloned();
        }
    }

    // Leaf tooltips, after summing.
    let fmt = ctx.format_config(ctx.data_options.value.first());
    let series_name = series.display_name().to_string();
    for (at, path) in &leaf_paths {
        let node = &mut nodes[*at];
        let value = node.value.unwrap_or(f64::NAN);
        let tip = PointContext::new(&series_name, PointValues::Value(value)).with_category(path);
        let text = format_point(&tip, &fmt);
        let blurred = node.custom.as_ref().is_some_and(|c| c.blur);
        if blurred && let Some(c) = node.color.as_deref() {
            node.color = Some(style::blur(c));
        }
        if let Some(custom) = node.custom.as_mut() {
            custom.tooltip = Some(text);
        }
    }

    FamilyOutput {
        series: vec![SeriesOutput {
            name: series_name,
            data: nodes,
            ..SeriesOutput::default()
        }],
        alerts,
        ..FamilyOutput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Series, XValue};
    use crate::options::{DataOptions, DesignOptions};
    use crate::translate::DefaultTranslator;

    fn data() -> SeriesChartData {
        SeriesChartData {
            series: vec![Series::new("sales", &[3.0, 4.0, 5.0])],
            x_values: vec![
                XValue::new(&["EU", "DE"]),
                XValue::new(&["EU", "FR"]),
                XValue::new(&["US", "CA"]),
            ],
            x_axis_count: 2,
        }
    }

    fn build(chart_type: ChartType) -> FamilyOutput {
        let opts = DataOptions::default();
        let design = DesignOptions::for_chart_type(chart_type);
        let ctx = BuildContext {
            chart_type,
            data_options: &opts,
            design: &design,
            translator: &DefaultTranslator,
            locale: "en",
        };
        build_hierarchy(&data(), &ctx)
    }

    #[test]
    fn treemap_nodes_link_parents() {
        let out = build(ChartType::Treemap);
        let nodes = &out.series[0].data;
        assert_eq!(nodes.len(), 5);
        let de = nodes.iter().find(|n| n.id.as_deref() == Some("EU_DE")).unwrap();
        assert_eq!(de.parent.as_deref(), Some("EU"));
        assert_eq!(de.value, Some(3.0));
        let eu = nodes.iter().find(|n| n.id.as_deref() == Some("EU")).unwrap();
        assert!(eu.parent.is_none());
        assert!(eu.color.is_some());
    }

    #[test]
    fn sunburst_adds_total_root() {
        let out = build(ChartType::Sunburst);
        let nodes = &out.series[0].data;
        assert_eq!(nodes[0].name.as_deref(), Some("Total"));
        let us = nodes.iter().find(|n| n.id.as_deref() == Some("US")).unwrap();
        assert_eq!(us.parent.as_deref(), Some(ROOT_ID));
    }

    #[test]
    fn underscores_in_labels_keep_paths_apart() {
        let data = SeriesChartData {
            series: vec![Series::new("sales", &[1.0, 2.0])],
            x_values: vec![XValue::new(&["A", "B_C"]), XValue::new(&["A_B", "C"])],
            x_axis_count: 2,
        };
        let opts = DataOptions::default();
        let design = DesignOptions::for_chart_type(ChartType::Treemap);
        let ctx = BuildContext {
            chart_type: ChartType::Treemap,
            data_options: &opts,
            design: &design,
            translator: &DefaultTranslator,
            locale: "en",
        };
        let out = build_hierarchy(&data, &ctx);
        let nodes = &out.series[0].data;
        assert_eq!(nodes.len(), 4);

        let first = nodes.iter().find(|n| n.id.as_deref() == Some(r"A_B\_C")).unwrap();
        assert_eq!(first.parent.as_deref(), Some("A"));
        assert_eq!(first.value, Some(1.0));
        let second = nodes.iter().find(|n| n.id.as_deref() == Some(r"A\_B_C")).unwrap();
        assert_eq!(second.parent.as_deref(), Some(r"A\_B"));
        assert_eq!(second.value, Some(2.0));
        assert!(nodes.iter().any(|n| n.id.as_deref() == Some(r"A\_B")));
    }
}
