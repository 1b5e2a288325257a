use chartopts::models::{Series, SeriesChartData, XValue};
use chartopts::options::{
    Column, ConvolutionMode, ConvolutionOptions, FunnelOptions, FunnelSize, PieOptions, PieType,
    SortType,
};
use chartopts::style::OTHERS_COLOR;
use chartopts::{ChartData, ChartType, DataOptions, DefaultTranslator, DesignOptions, compile};

fn slices(labels: &[&str], values: &[f64]) -> ChartData {
    ChartData::Categorical(SeriesChartData::new(
        labels.iter().map(|l| XValue::new(&[l])).collect(),
        vec![Series::new("share", values)],
    ))
}

fn convolved_pie(threshold: f64) -> DesignOptions {
    DesignOptions::for_chart_type(ChartType::Pie).with_pie(PieOptions {
        pie_type: PieType::Donut,
        convolution: ConvolutionOptions {
            enabled: true,
            mode: ConvolutionMode::ByPercentage,
            minimal_independent_slice_percentage: threshold,
            independent_slices_count: 7,
        },
    })
}

#[test]
fn small_slices_fold_into_others_with_drilldown() {
    let data = slices(&["a", "b", "c", "d"], &[60.0, 25.0, 10.0, 5.0]);
    let out = compile(
        ChartType::Pie,
        &data,
        &DataOptions::default(),
        &convolved_pie(12.0),
        &DefaultTranslator,
    )
    .unwrap();

    let points = &out.options.series[0].data;
    let names: Vec<&str> = points.iter().filter_map(|p| p.name.as_deref()).collect();
    assert_eq!(names, vec!["a", "b", "Others"]);
    let others = &points[2];
    assert_eq!(others.y_value(), Some(15.0));
    assert_eq!(others.color.as_deref(), Some(OTHERS_COLOR));
    assert_eq!(others.drilldown.as_deref(), Some("others"));

    let drilldown = out.options.drilldown.as_ref().unwrap();
    let members: Vec<&str> = drilldown.series[0]
        .data
        .iter()
        .filter_map(|p| p.name.as_deref())
        .collect();
    assert_eq!(members, vec!["c", "d"]);

    let pie = out.options.plot_options.pie.as_ref().unwrap();
    assert_eq!(pie.inner_size, "40%");
}

#[test]
fn slice_percentages_and_tooltips() {
    let data = slices(&["a", "b"], &[75.0, 25.0]);
    let design = DesignOptions::for_chart_type(ChartType::Pie);
    let out = compile(ChartType::Pie, &data, &DataOptions::default(), &design, &DefaultTranslator).unwrap();
    let first = out.options.series[0].data[0].custom.as_ref().unwrap();
    assert_eq!(first.percent, Some(75.0));
    assert!(first.tooltip.as_deref().unwrap().contains("(75%)"));
    assert!(out.options.drilldown.is_none());
}

#[test]
fn explicit_category_colors_win() {
    let data = slices(&["a", "b"], &[1.0, 2.0]);
    let mut opts = DataOptions::default();
    opts.series_to_color_map.insert("b".into(), "#123456".into());
    let design = DesignOptions::for_chart_type(ChartType::Pie);
    let out = compile(ChartType::Pie, &data, &opts, &design, &DefaultTranslator).unwrap();
    assert_eq!(out.options.series[0].data[1].color.as_deref(), Some("#123456"));
    assert_ne!(out.options.series[0].data[0].color.as_deref(), Some("#123456"));
}

#[test]
fn wide_funnel_neck_is_sixty_percent_of_width() {
    let data = slices(&["visits", "leads", "deals"], &[1000.0, 400.0, 50.0]);
    let design = DesignOptions::for_chart_type(ChartType::Funnel).with_funnel(FunnelOptions {
        size: FunnelSize::Wide,
        ..FunnelOptions::default()
    });
    let out = compile(ChartType::Funnel, &data, &DataOptions::default(), &design, &DefaultTranslator).unwrap();
    let funnel = out.options.plot_options.funnel.as_ref().unwrap();
    assert_eq!(funnel.width, "60%");
    assert_eq!(funnel.neck_width, "36%");
    assert_eq!(funnel.neck_height, "0%");

    let percents: Vec<f64> = out.options.series[0]
        .data
        .iter()
        .filter_map(|p| p.custom.as_ref().and_then(|c| c.percent))
        .collect();
    assert_eq!(percents, vec![100.0, 40.0, 5.0]);
}

#[test]
fn funnel_sorts_by_value_column() {
    let data = slices(&["x", "y", "z"], &[10.0, 30.0, 20.0]);
    let opts = DataOptions {
        value: vec![Column {
            sort_type: Some(SortType::Desc),
            ..Column::numeric("share")
        }],
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Funnel).with_container(800.0, 300.0);
    let out = compile(ChartType::Funnel, &data, &opts, &design, &DefaultTranslator).unwrap();
    let names: Vec<&str> = out.options.series[0]
        .data
        .iter()
        .filter_map(|p| p.name.as_deref())
        .collect();
    assert_eq!(names, vec!["y", "z", "x"]);
    assert_eq!(out.options.plot_options.funnel.as_ref().unwrap().width, "45%");
}

#[test]
fn treemap_nodes_reference_parents() {
    let data = ChartData::Categorical(SeriesChartData::new(
        vec![
            XValue::new(&["Fruit", "Apple"]),
            XValue::new(&["Fruit", "Pear"]),
            XValue::new(&["Veg", "Leek"]),
        ],
        vec![Series::new("kg", &[4.0, 2.0, 1.0])],
    ));
    let design = DesignOptions::for_chart_type(ChartType::Treemap);
    let out = compile(ChartType::Treemap, &data, &DataOptions::default(), &design, &DefaultTranslator).unwrap();
    assert_eq!(out.options.chart.chart_type, "treemap");
    let nodes = &out.options.series[0].data;
    let pear = nodes.iter().find(|n| n.name.as_deref() == Some("Pear")).unwrap();
    assert_eq!(pear.parent.as_deref(), Some("Fruit"));
    assert_eq!(pear.value, Some(2.0));
    assert!(nodes.iter().all(|n| n.parent.is_none() == n.color.is_some()));
}
