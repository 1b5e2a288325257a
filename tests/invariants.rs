use chartopts::axis::{AxisExtent, ExtentRules, Stacking, finalize_extent, raw_extent};
use chartopts::limits::{LimitDimension, truncate};
use chartopts::models::{Series, SeriesChartData, XValue};
use chartopts::options::{AxisOptions, StackType};
use chartopts::{ChartData, ChartType, DataOptions, DefaultTranslator, DesignOptions, compile};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = f64> {
    prop_oneof![4 => -1.0e6..1.0e6f64, 1 => Just(f64::NAN)]
}

proptest! {
    #[test]
    fn truncate_keeps_prefix(len in 0usize..40, capacity in 0usize..40) {
        let items: Vec<usize> = (0..len).collect();
        let (kept, alert) = truncate(&items, capacity, LimitDimension::X);
        prop_assert_eq!(kept.len(), len.min(capacity));
        prop_assert_eq!(kept, &items[..kept.len()]);
        prop_assert_eq!(alert.is_some(), len > capacity);
    }

    #[test]
    fn finalized_extent_is_ordered(
        values in prop::collection::vec(value(), 0..20),
        explicit_min in prop::option::of(-1.0e6..1.0e6f64),
        explicit_max in prop::option::of(-1.0e6..1.0e6f64),
        clamp in any::<bool>(),
        labels in any::<bool>(),
    ) {
        let rules = ExtentRules { explicit_min, explicit_max, clamp_to_zero: clamp, value_labels: labels };
        let (min, max) = finalize_extent(raw_extent(&[&values], Stacking::None), Stacking::None, rules);
        if let (Some(lo), Some(hi)) = (min, max) {
            prop_assert!(lo <= hi, "min {} > max {}", lo, hi);
        }
    }

    #[test]
    fn normal_stacking_brackets_zero(
        a in prop::collection::vec(value(), 1..10),
        b in prop::collection::vec(value(), 1..10),
    ) {
        if let Some(AxisExtent { min, max }) = raw_extent(&[&a, &b], Stacking::Normal) {
            prop_assert!(min <= 0.0 && 0.0 <= max);
        }
    }

    #[test]
    fn compiled_series_stay_aligned_with_categories(
        rows in prop::collection::vec(prop::collection::vec(value(), 6), 1..8),
        series_capacity in 1usize..10,
        categories_capacity in 1usize..10,
    ) {
        let x_values: Vec<XValue> = ["a", "b", "c", "d", "e", "f"].iter().map(|l| XValue::new(&[l])).collect();
        let series: Vec<Series> = rows.iter().enumerate().map(|(i, r)| Series::new(format!("s{i}"), r)).collect();
        let data = ChartData::Cartesian(SeriesChartData::new(x_values, series));
        let design = DesignOptions::for_chart_type(ChartType::Column)
            .with_stack_type(StackType::Stacked)
            .with_data_limits(series_capacity, categories_capacity);
        let out = compile(ChartType::Column, &data, &DataOptions::default(), &design, &DefaultTranslator).unwrap();

        let categories = out.options.x_axis[0].categories.clone().unwrap_or_default();
        prop_assert_eq!(categories.len(), 6usize.min(categories_capacity));
        prop_assert_eq!(out.options.series.len(), rows.len().min(series_capacity));
        for s in &out.options.series {
            prop_assert_eq!(s.data.len(), categories.len());
        }
        let expected_alerts = usize::from(rows.len() > series_capacity) + usize::from(6 > categories_capacity);
        prop_assert_eq!(out.alerts.len(), expected_alerts);
        if let (Some(lo), Some(hi)) = (out.options.y_axis[0].min, out.options.y_axis[0].max) {
            prop_assert!(lo <= hi);
        }
    }

    #[test]
    fn inverted_explicit_bounds_are_repaired(lo in 1.0..1.0e6f64, gap in 0.1..1.0e3f64) {
        let data = ChartData::Cartesian(SeriesChartData::new(
            vec![XValue::new(&["a"])],
            vec![Series::new("s", &[1.0])],
        ));
        let design = DesignOptions::for_chart_type(ChartType::Line).with_y_axis(AxisOptions {
            min: Some(lo),
            max: Some(lo - gap),
            ..AxisOptions::default()
        });
        let out = compile(ChartType::Line, &data, &DataOptions::default(), &design, &DefaultTranslator).unwrap();
        let y = &out.options.y_axis[0];
        prop_assert_eq!(y.min, Some(lo));
        prop_assert!(y.max.unwrap() >= lo);
    }
}
