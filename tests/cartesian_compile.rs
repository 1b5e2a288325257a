use chartopts::chart::types::{AxisType, StackingOutput};
use chartopts::limits::{AlertCode, LimitDimension};
use chartopts::models::{Series, SeriesChartData, XValue};
use chartopts::options::{AxisOptions, Column, DateGranularity, StackType};
use chartopts::{
    ChartData, ChartType, CompiledChart, DataOptions, DefaultTranslator, DesignOptions, compile,
};

fn xs(labels: &[&str]) -> Vec<XValue> {
    labels.iter().map(|l| XValue::new(&[l])).collect()
}

fn run(chart_type: ChartType, data: &ChartData, opts: &DataOptions, design: &DesignOptions) -> CompiledChart {
    compile(chart_type, data, opts, design, &DefaultTranslator).unwrap()
}

#[test]
fn compiling_twice_gives_identical_output() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["a", "b", "c"]),
        vec![Series::new("x", &[1.0, 2.0, 3.0]), Series::new("y", &[3.0, f64::NAN, 1.0])],
    ));
    let opts = DataOptions::default();
    let design = DesignOptions::for_chart_type(ChartType::Line);
    let first = run(ChartType::Line, &data, &opts, &design);
    let second = run(ChartType::Line, &data, &opts, &design);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn truncation_keeps_prefix_and_alerts_once_per_dimension() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["a", "b", "c", "d", "e"]),
        vec![
            Series::new("s1", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            Series::new("s2", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            Series::new("s3", &[1.0, 2.0, 3.0, 4.0, 5.0]),
        ],
    ));
    let design = DesignOptions::for_chart_type(ChartType::Column).with_data_limits(2, 3);
    let out = run(ChartType::Column, &data, &DataOptions::default(), &design);

    let names: Vec<&str> = out.options.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["s1", "s2"]);
    assert_eq!(
        out.options.x_axis[0].categories.as_deref(),
        Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
    );
    assert!(out.options.series.iter().all(|s| s.data.len() == 3));

    assert_eq!(out.alerts.len(), 2);
    assert_eq!(out.alerts[0].code, AlertCode::SeriesSliceWarning);
    assert_eq!(out.alerts[0].params.count, 3);
    assert_eq!(out.alerts[1].code, AlertCode::CategoriesSliceWarning);
    assert_eq!(out.alerts[1].params.dimension, LimitDimension::X);
    assert_eq!(
        out.alerts[1].message(&DefaultTranslator),
        "Showing first 3 of 5 categories"
    );
}

#[test]
fn dual_category_axis_has_one_band_per_group() {
    let x_values = vec![
        XValue::new(&["2023", "Q1"]),
        XValue::new(&["2023", "Q2"]),
        XValue::new(&["2024", "Q1"]),
        XValue::new(&["2024", "Q2"]),
        XValue::new(&["2025", "Q1"]),
    ];
    let data = ChartData::Cartesian(SeriesChartData::new(
        x_values,
        vec![Series::new("rev", &[1.0, 2.0, 3.0, 4.0, 5.0])],
    ));
    let opts = DataOptions {
        category: vec![Column::new("year"), Column::new("quarter")],
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Column);
    let out = run(ChartType::Column, &data, &opts, &design);

    let axis = &out.options.x_axis[0];
    let categories = axis.categories.as_ref().unwrap();
    assert_eq!(categories.len(), 7);
    assert_eq!(categories.iter().filter(|c| c.as_str() == " ").count(), 2);
    assert_eq!(axis.plot_bands.len(), 3);
    let texts: Vec<&str> = axis.plot_bands.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, vec!["2023", "2024", "2025"]);
    assert!(axis.plot_bands.windows(2).all(|w| w[0].to <= w[1].from));

    // Separator positions carry no value.
    let points = &out.options.series[0].data;
    assert_eq!(points.len(), 7);
    assert_eq!(points[2].y, Some(None));
    assert_eq!(points[3].y, Some(Some(3.0)));
}

#[test]
fn percent_stacking_spans_zero_to_hundred() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["a", "b"]),
        vec![Series::new("x", &[30.0, 10.0]), Series::new("y", &[70.0, 90.0])],
    ));
    let design = DesignOptions::for_chart_type(ChartType::Column).with_stack_type(StackType::Stack100);
    let out = run(ChartType::Column, &data, &DataOptions::default(), &design);
    assert_eq!(out.options.y_axis[0].min, Some(0.0));
    assert_eq!(out.options.y_axis[0].max, Some(100.0));
    assert_eq!(
        out.options.plot_options.series.stacking,
        Some(StackingOutput::Percent)
    );
}

#[test]
fn explicit_min_above_data_widens_max() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["a", "b"]),
        vec![Series::new("x", &[5.0, 10.0])],
    ));
    let design = DesignOptions::for_chart_type(ChartType::Line).with_y_axis(AxisOptions {
        min: Some(50.0),
        ..AxisOptions::default()
    });
    let out = run(ChartType::Line, &data, &DataOptions::default(), &design);
    let y = &out.options.y_axis[0];
    assert_eq!(y.min, Some(50.0));
    assert_eq!(y.max, Some(100.0));
}

#[test]
fn continuous_month_axis_fills_missing_month() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["2024-01", "2024-02", "2024-04"]),
        vec![Series::new("orders", &[4.0, 6.0, 5.0])],
    ));
    let opts = DataOptions {
        category: vec![Column::datetime("month", DateGranularity::Months).continuous()],
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Line);
    let out = run(ChartType::Line, &data, &opts, &design);

    assert_eq!(out.options.x_axis[0].axis_type, AxisType::Datetime);
    assert!(out.options.x_axis[0].plot_bands.is_empty());
    let points = &out.options.series[0].data;
    assert_eq!(points.len(), 4);
    assert_eq!(points[2].y, Some(None));
    let (before, gap, after) = (points[1].x.unwrap(), points[2].x.unwrap(), points[3].x.unwrap());
    assert!(before < gap && gap < after);
}

#[test]
fn continuous_gap_is_zero_when_nulls_count_as_zero() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["2024-01", "2024-02", "2024-04"]),
        vec![Series::new("orders", &[4.0, 6.0, 5.0])],
    ));
    let opts = DataOptions {
        category: vec![Column::datetime("month", DateGranularity::Months).continuous()],
        value: vec![Column::numeric("orders").nulls_as_zeros()],
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Line);
    let out = run(ChartType::Line, &data, &opts, &design);

    let points = &out.options.series[0].data;
    assert_eq!(points.len(), 4);
    assert_eq!(points[2].y, Some(Some(0.0)));
    assert!(points[2].marker.is_none());
    assert_eq!(out.options.y_axis[0].min, Some(0.0));
}

#[test]
fn group_separators_fit_within_category_capacity() {
    let data = ChartData::Cartesian(SeriesChartData::new(
        vec![
            XValue::new(&["north", "a"]),
            XValue::new(&["south", "b"]),
            XValue::new(&["west", "c"]),
        ],
        vec![Series::new("rev", &[1.0, 2.0, 3.0])],
    ));
    let opts = DataOptions {
        category: vec![Column::new("region"), Column::new("store")],
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Column).with_data_limits(10, 3);
    let out = run(ChartType::Column, &data, &opts, &design);

    let axis = &out.options.x_axis[0];
    assert_eq!(axis.categories.as_deref().map(|c| c.len()), Some(3));
    assert_eq!(axis.plot_bands.len(), 2);
    assert_eq!(out.options.series[0].data.len(), 3);
    assert_eq!(out.alerts.len(), 1);
    assert_eq!(out.alerts[0].params.dimension, LimitDimension::X);
}

#[test]
fn isolated_points_serialize_with_marker() {
    let nan = f64::NAN;
    let data = ChartData::Cartesian(SeriesChartData::new(
        xs(&["a", "b", "c", "d", "e"]),
        vec![Series::new("s", &[5.0, nan, 7.0, nan, 9.0])],
    ));
    let design = DesignOptions::for_chart_type(ChartType::Line);
    let out = run(ChartType::Line, &data, &DataOptions::default(), &design);
    let json = serde_json::to_value(&out.options.series[0].data).unwrap();
    for i in [0, 2, 4] {
        assert_eq!(json[i]["marker"]["enabled"], true);
        assert_eq!(json[i]["marker"]["isIsolatedPoint"], true);
    }
    assert!(json[1]["y"].is_null());
    assert!(json[1].get("marker").is_none());
}

#[test]
fn output_uses_renderer_field_names() {
    let data = ChartData::Cartesian(SeriesChartData::new(xs(&["a"]), vec![Series::new("s", &[1.0])]));
    let design = DesignOptions::for_chart_type(ChartType::Bar);
    let out = run(ChartType::Bar, &data, &DataOptions::default(), &design);
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["options"]["chart"]["type"], "bar");
    assert_eq!(json["options"]["xAxis"][0]["type"], "category");
    assert_eq!(json["options"]["yAxis"][0]["type"], "linear");
    assert_eq!(json["options"]["tooltip"]["pointFormatField"], "custom.tooltip");
    assert!(json["options"]["series"][0]["data"][0]["custom"]["tooltip"].is_string());
    assert!(json["alerts"].as_array().unwrap().is_empty());
}
