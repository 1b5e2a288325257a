use chartopts::chart::types::AxisType;
use chartopts::models::{
    BoxSummary, BoxplotChartData, CellValue, OutlierPoint, Point, RangeChartData, RangeSeries,
    ScatterChartData, ScatterRow, XValue,
};
use chartopts::options::{Column, ColorRule, ColumnType};
use chartopts::{
    ChartData, ChartRequest, ChartType, CompileError, DataOptions, DefaultTranslator,
    DesignOptions, compile, compile_request,
};

fn num(v: f64) -> Option<CellValue> {
    Some(CellValue::Number(v))
}

#[test]
fn bubble_rows_colored_by_numeric_rule() {
    let rows = (1..=3)
        .map(|i| ScatterRow {
            x: num(i as f64),
            y: num(i as f64 * 2.0),
            size: num(10.0),
            break_by_color: num(i as f64),
            break_by_point: Some(format!("city{i}")),
            ..ScatterRow::default()
        })
        .collect();
    let opts = DataOptions {
        x: Some(Column::numeric("area")),
        y: Some(Column::numeric("population")),
        size: Some(Column::numeric("gdp")),
        color_by: Some(Column::numeric("growth").with_color(ColorRule::Range {
            min_color: "#000000".into(),
            max_color: "#FFFFFF".into(),
            mid_color: None,
            min: None,
            mid: None,
            max: None,
        })),
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Scatter);
    let out = compile(
        ChartType::Scatter,
        &ChartData::Scatter(ScatterChartData { rows }),
        &opts,
        &design,
        &DefaultTranslator,
    )
    .unwrap();

    assert_eq!(out.options.chart.chart_type, "bubble");
    assert_eq!(out.options.series.len(), 1);
    let points = &out.options.series[0].data;
    assert_eq!(points[0].color.as_deref(), Some("#000000"));
    assert_eq!(points[2].color.as_deref(), Some("#FFFFFF"));
    assert_eq!(points[1].name.as_deref(), Some("city2"));
    assert_eq!(points[1].z, Some(Some(10.0)));
    assert!(out.options.plot_options.bubble.is_some());
    assert_eq!(out.options.x_axis[0].axis_type, AxisType::Linear);
}

#[test]
fn scatter_rows_without_coordinates_are_skipped() {
    let rows = vec![
        ScatterRow {
            x: num(1.0),
            y: num(1.0),
            ..ScatterRow::default()
        },
        ScatterRow {
            x: None,
            y: num(2.0),
            ..ScatterRow::default()
        },
    ];
    let opts = DataOptions {
        x: Some(Column::numeric("x")),
        y: Some(Column::numeric("y")),
        ..DataOptions::default()
    };
    let out = compile(
        ChartType::Scatter,
        &ChartData::Scatter(ScatterChartData { rows }),
        &opts,
        &DesignOptions::for_chart_type(ChartType::Scatter),
        &DefaultTranslator,
    )
    .unwrap();
    assert_eq!(out.options.chart.chart_type, "scatter");
    assert_eq!(out.options.series[0].name, "y");
    assert_eq!(out.options.series[0].data.len(), 1);
}

#[test]
fn scatter_text_axis_is_truncated_with_alert() {
    let rows = ["d", "c", "b", "a"]
        .iter()
        .map(|l| ScatterRow {
            x: Some(CellValue::Text(l.to_string())),
            y: num(1.0),
            ..ScatterRow::default()
        })
        .collect();
    let opts = DataOptions {
        x: Some(Column {
            data_type: ColumnType::Text,
            ..Column::new("label")
        }),
        ..DataOptions::default()
    };
    let design = DesignOptions::for_chart_type(ChartType::Scatter).with_data_limits(50, 2);
    let out = compile(
        ChartType::Scatter,
        &ChartData::Scatter(ScatterChartData { rows }),
        &opts,
        &design,
        &DefaultTranslator,
    )
    .unwrap();
    assert_eq!(
        out.options.x_axis[0].categories.as_deref(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(out.options.series[0].data.len(), 2);
    assert_eq!(out.alerts.len(), 1);
}

#[test]
fn boxplot_links_outliers_to_boxes() {
    let data = ChartData::Boxplot(BoxplotChartData {
        x_values: vec![XValue::new(&["north"]), XValue::new(&["south"])],
        x_axis_count: 1,
        boxes: vec![
            BoxSummary::new(1.0, 2.0, 3.0, 4.0, 5.0),
            BoxSummary::new(2.0, 3.0, 4.0, 5.0, 6.0),
        ],
        outliers: vec![OutlierPoint {
            x: 1,
            value: 9.0,
            blur: true,
        }],
    });
    let out = compile(
        ChartType::Boxplot,
        &data,
        &DataOptions::default(),
        &DesignOptions::for_chart_type(ChartType::Boxplot),
        &DefaultTranslator,
    )
    .unwrap();
    let json = serde_json::to_value(&out.options).unwrap();
    assert_eq!(json["chart"]["type"], "boxplot");
    assert_eq!(json["series"][0]["data"][1]["median"], 4.0);
    assert_eq!(json["series"][1]["linkedTo"], json["series"][0]["id"]);
    assert_eq!(json["series"][1]["type"], "scatter");
    assert_eq!(json["series"][1]["data"][0]["x"], 1.0);
    assert_eq!(json["series"][1]["data"][0]["custom"]["blur"], true);
    assert_eq!(json["yAxis"][0]["max"], 9.0);
}

#[test]
fn range_band_spans_both_bounds() {
    let data = ChartData::Range(RangeChartData {
        x_values: vec![XValue::new(&["Q1"]), XValue::new(&["Q2"]), XValue::new(&["Q3"])],
        x_axis_count: 1,
        series: vec![RangeSeries {
            name: "forecast".into(),
            title: Some("Forecast".into()),
            lower: vec![Point::new(10.0), Point::gap(), Point::new(12.0)],
            upper: vec![Point::new(20.0), Point::gap(), Point::new(25.0)],
        }],
    });
    let out = compile(
        ChartType::Arearange,
        &data,
        &DataOptions::default(),
        &DesignOptions::for_chart_type(ChartType::Arearange),
        &DefaultTranslator,
    )
    .unwrap();
    let series = &out.options.series[0];
    assert_eq!(series.name, "Forecast");
    assert_eq!((series.data[0].low, series.data[0].high), (Some(10.0), Some(20.0)));
    assert_eq!((series.data[1].low, series.data[1].high), (None, None));
    assert_eq!(out.options.y_axis[0].min, Some(10.0));
    assert_eq!(out.options.y_axis[0].max, Some(25.0));
}

#[test]
fn request_family_mismatch_is_rejected() {
    let request: ChartRequest = serde_json::from_str(
        r#"{"chartType": "pie", "data": {"type": "scatter", "rows": []}}"#,
    )
    .unwrap();
    let err = compile_request(&request, &DefaultTranslator).unwrap_err();
    assert!(matches!(err, CompileError::UnexpectedChartType { .. }));
    assert_eq!(
        err.to_string(),
        "unexpected chart type 'pie' for scatter chart data"
    );
}
