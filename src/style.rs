//! Deterministic color assignment for series and points.
//!
//! Resolution order, first match wins:
//! 1. an explicit color on the data point,
//! 2. an explicit entry in the data options' series/category color map,
//! 3. the measure column's color rule (`uniform`, `range`, `conditional`),
//! 4. the next unused palette color, handed out in sorted key order.
//!
//! Identical inputs always produce identical colors.

use ahash::AHashSet;
use std::collections::BTreeMap;

use crate::color::{self, Rgb8};
use crate::models::Point;
use crate::options::ColorRule;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#4472C4", // blue
    "#ED7D31", // orange
    "#A5A5A5", // gray
    "#FFC000", // gold
    "#5B9BD5", // light blue
    "#70AD47", // green
    "#264478", // dark blue
    "#9E480E", // dark orange
    "#636363", // dark gray
    "#997300", // brownish gold
];

/// Fixed neutral color of aggregated "Others" slices.
pub const OTHERS_COLOR: &str = "#BFBFBF";

const BLUR_FADE: f64 = 0.6;

/// Observed value range of a measure, used to anchor `range` color rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueExtent {
    pub min: f64,
    pub max: f64,
}

impl ValueExtent {
    /// Extent of all finite values, `None` when there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<ValueExtent>, v| match acc {
                None => Some(ValueExtent { min: v, max: v }),
                Some(e) => Some(ValueExtent {
                    min: e.min.min(v),
                    max: e.max.max(v),
                }),
            })
    }
}

/// Resolves series and point colors for one compilation.
#[derive(Debug, Clone)]
pub struct ColorResolver<'a> {
    palette: Vec<String>,
    explicit: &'a BTreeMap<String, String>,
}

impl<'a> ColorResolver<'a> {
    pub fn new(palette: &[String], explicit: &'a BTreeMap<String, String>) -> Self {
        let palette: Vec<String> = palette
            .iter()
            .filter(|c| Rgb8::parse(c).is_some())
            .map(|c| color::normalize(c))
            .collect();
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette
        };
        Self { palette, explicit }
    }

    /// Color from the explicit series/category map.
    pub fn explicit_color(&self, key: &str) -> Option<String> {
        self.explicit
            .get(key)
            .filter(|c| Rgb8::parse(c).is_some())
            .map(|c| color::normalize(c))
    }

    /// First palette color, used when a chart has exactly one implicit series.
    pub fn primary(&self) -> String {
        self.palette[0].clone()
    }

    /// Assign a series-level color to every key.
    ///
    /// Keys are visited in sorted order (numerically when `numeric`, lexicographically
    /// otherwise) so that palette positions do not depend on input order.
    pub fn assign(
        &self,
        keys: &[String],
        numeric: bool,
        rule: Option<&ColorRule>,
    ) -> BTreeMap<String, String> {
        let uniform = match rule {
            Some(ColorRule::Uniform { color: c }) if Rgb8::parse(c).is_some() => {
                Some(color::normalize(c))
            }
            _ => None,
        };

        let taken: AHashSet<String> = keys
            .iter()
            .filter_map(|k| self.explicit_color(k))
            .collect();
        let mut cursor = PaletteCursor::new(&self.palette, taken);

        let mut out = BTreeMap::new();
        for key in sorted_keys(keys, numeric) {
            if out.contains_key(&key) {
                continue;
            }
            let c = self
                .explicit_color(&key)
                .or_else(|| uniform.clone())
                .unwrap_or_else(|| cursor.next_color());
            out.insert(key, c);
        }
        out
    }

    /// Color a point needs on its own, from tiers 1–3. `None` means "use the series color".
    pub fn point_color(
        &self,
        point: &Point,
        key: &str,
        rule: Option<&ColorRule>,
        extent: Option<ValueExtent>,
    ) -> Option<String> {
        point
            .color
            .as_deref()
            .filter(|c| Rgb8::parse(c).is_some())
            .map(color::normalize)
            .or_else(|| self.explicit_color(key))
            .or_else(|| rule.and_then(|r| rule_color(r, point.value, extent)))
    }
}

/// Faded variant of a color for de-emphasized points.
pub fn blur(c: &str) -> String {
    color::fade(c, BLUR_FADE)
}

/// Evaluate a color rule for one value. `None` when the rule cannot color it
/// (gap value, unparseable colors, no anchors).
pub fn rule_color(rule: &ColorRule, value: f64, extent: Option<ValueExtent>) -> Option<String> {
    match rule {
        ColorRule::Uniform { color: c } => Rgb8::parse(c).map(|rgb| rgb.to_hex()),
        ColorRule::Range {
            min_color,
            max_color,
            mid_color,
            min,
            mid,
            max,
        } => {
            if !value.is_finite() {
                return None;
            }
            let lo = min.or(extent.map(|e| e.min))?;
            let hi = max.or(extent.map(|e| e.max))?;
            let lo_c = Rgb8::parse(min_color)?;
            let hi_c = Rgb8::parse(max_color)?;
            if hi <= lo {
                return Some(lo_c.to_hex());
            }
            let mid_anchor = mid_color
                .as_deref()
                .and_then(Rgb8::parse)
                .map(|c| (mid.unwrap_or((lo + hi) / 2.0), c));
            let rgb = match mid_anchor {
                Some((m, mid_c)) if value <= m && m > lo => {
                    color::interpolate(lo_c, mid_c, (value - lo) / (m - lo))
                }
                Some((m, mid_c)) if m < hi => color::interpolate(mid_c, hi_c, (value - m) / (hi - m)),
                _ => color::interpolate(lo_c, hi_c, (value - lo) / (hi - lo)),
            };
            Some(rgb.to_hex())
        }
        ColorRule::Conditional {
            conditions,
            default_color,
        } => {
            if !value.is_finite() {
                return None;
            }
            conditions
                .iter()
                .find(|c| {
                    c.expression
                        .map(|e| c.operator.matches(value, e))
                        .unwrap_or(false)
                })
                .map(|c| c.color.as_str())
                .or(Some(default_color.as_str()))
                .filter(|c| Rgb8::parse(c).is_some())
                .map(color::normalize)
        }
    }
}

/// Distinct keys in stable sorted order.
pub fn sorted_keys(keys: &[String], numeric: bool) -> Vec<String> {
    let mut out: Vec<String> = keys.to_vec();
    if numeric {
        out.sort_by(|a, b| {
            match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(x), Ok(y)) => x.total_cmp(&y),
                (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            }
        });
    } else {
        out.sort();
    }
    out.dedup();
    out
}

/// Hands out palette colors in order, skipping colors taken by explicit assignments.
struct PaletteCursor<'p> {
    palette: &'p [String],
    taken: AHashSet<String>,
    next: usize,
}

impl<'p> PaletteCursor<'p> {
    fn new(palette: &'p [String], taken: AHashSet<String>) -> Self {
        Self {
            palette,
            taken,
            next: 0,
        }
    }

    fn next_color(&mut self) -> String {
        let n = self.palette.len();
        for _ in 0..n {
            let candidate = &self.palette[self.next % n];
            self.next += 1;
            if !self.taken.contains(candidate) {
                return candidate.clone();
            }
        }
        // Every palette color is taken; cycle regardless.
        let c = self.palette[self.next % n].clone();
        self.next += 1;
        c
    }
}
