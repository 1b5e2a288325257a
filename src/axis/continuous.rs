//! Continuous datetime axis: ticks from compare values and calendar-aware gap filling.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use log::debug;

use super::{AxisLayout, Tick};
use crate::models::XValue;
use crate::options::DateGranularity;

/// Build datetime ticks. Rows without a usable timestamp are left off the axis.
///
/// Whenever two consecutive timestamps are more than one granularity step apart, gap
/// ticks are synthesized at each missing step, with at most `max_categories` ticks
/// in the finished axis.
pub fn build_continuous_layout(
    x_values: &[XValue],
    granularity: DateGranularity,
    max_categories: usize,
) -> AxisLayout {
    let stamped: Vec<(usize, f64)> = x_values
        .iter()
        .enumerate()
        .filter_map(|(i, x)| timestamp_of(x).map(|t| (i, t)))
        .collect();

    let mut budget = max_categories.saturating_sub(stamped.len());
    let mut ticks = Vec::with_capacity(stamped.len());
    let mut values = Vec::with_capacity(stamped.len());

    for (k, &(i, ts)) in stamped.iter().enumerate() {
        if k > 0 {
            let prev = stamped[k - 1].1;
            let filled = fill_between(prev, ts, granularity, budget);
            budget -= filled.len();
            for gap in filled {
                ticks.push(Tick::Gap);
                values.push(gap);
            }
        }
        ticks.push(Tick::Data(i));
        values.push(ts);
    }

    let synthesized = ticks.iter().filter(|t| **t == Tick::Gap).count();
    if synthesized > 0 {
        debug!("filled {synthesized} gap tick(s) on continuous axis");
    }

    AxisLayout {
        categories: values
            .iter()
            .map(|v| format_timestamp(*v, granularity).unwrap_or_default())
            .collect(),
        ticks,
        plot_bands: Vec::new(),
        tick_values: Some(values),
    }
}

/// Timestamps strictly between `from` and `to`, one per missing step, at most `budget`.
fn fill_between(from: f64, to: f64, granularity: DateGranularity, budget: usize) -> Vec<f64> {
    let mut out = Vec::new();
    let Some(first) = step(from, granularity) else {
        return out;
    };
    // Half a step of slack absorbs DST shifts and sloppy compare values.
    let slack = (first - from) / 2.0;
    let mut cursor = first;
    while out.len() < budget && cursor < to - slack {
        out.push(cursor);
        match step(cursor, granularity) {
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }
    out
}

/// Advance a millisecond timestamp by one granularity step.
pub fn step(ts_ms: f64, granularity: DateGranularity) -> Option<f64> {
    let dt = DateTime::<Utc>::from_timestamp_millis(ts_ms as i64)?;
    let next = match granularity {
        DateGranularity::Years => dt.checked_add_months(Months::new(12)),
        DateGranularity::Quarters => dt.checked_add_months(Months::new(3)),
        DateGranularity::Months => dt.checked_add_months(Months::new(1)),
        DateGranularity::Weeks => dt.checked_add_signed(TimeDelta::weeks(1)),
        DateGranularity::Days => dt.checked_add_signed(TimeDelta::days(1)),
        DateGranularity::Hours => dt.checked_add_signed(TimeDelta::hours(1)),
        DateGranularity::Minutes => dt.checked_add_signed(TimeDelta::minutes(1)),
    }?;
    Some(next.timestamp_millis() as f64)
}

fn timestamp_of(x: &XValue) -> Option<f64> {
    if let Some(v) = x.compare_values.as_ref().and_then(|c| c.first())
        && v.is_finite()
    {
        return Some(*v);
    }
    parse_date(x.x_values.first()?).map(|dt| dt.and_utc().timestamp_millis() as f64)
}

/// Parse the date shapes the query layer emits: RFC 3339, ISO date-times, dates,
/// `YYYY-MM` and bare years.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    let date = match s.len() {
        4 => NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
    }?;
    date.and_hms_opt(0, 0, 0)
}

fn format_datetime(dt: NaiveDateTime, granularity: DateGranularity) -> String {
    match granularity {
        DateGranularity::Years => dt.format("%Y").to_string(),
        DateGranularity::Quarters => format!("Q{} {}", (dt.month0() / 3) + 1, dt.year()),
        DateGranularity::Months => dt.format("%b %Y").to_string(),
        DateGranularity::Weeks | DateGranularity::Days => dt.format("%Y-%m-%d").to_string(),
        DateGranularity::Hours => dt.format("%Y-%m-%d %H:00").to_string(),
        DateGranularity::Minutes => dt.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Label for a millisecond timestamp at the given granularity.
pub fn format_timestamp(ts_ms: f64, granularity: DateGranularity) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp_millis(ts_ms as i64)?;
    Some(format_datetime(dt.naive_utc(), granularity))
}

/// Label for a raw date category string, `None` when it is not a date.
pub fn format_date_category(raw: &str, granularity: DateGranularity) -> Option<String> {
    parse_date(raw).map(|dt| format_datetime(dt, granularity))
}
