//! Value axis extents.
//!
//! The auto extent is computed from the data (stacking-aware), then reconciled with
//! explicit bounds so that the emitted `min <= max` always holds.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stacking {
    #[default]
    None,
    Normal,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
}

/// Per-axis inputs besides the data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtentRules {
    pub explicit_min: Option<f64>,
    pub explicit_max: Option<f64>,
    /// Column and bar axes start at zero when all data is positive.
    pub clamp_to_zero: bool,
    /// Leave headroom for value labels.
    pub value_labels: bool,
}

/// Data extent across the series sharing one axis side. `None` when there is no
/// finite value.
pub fn raw_extent(series: &[&[f64]], stacking: Stacking) -> Option<AxisExtent> {
    match stacking {
        Stacking::Percent => Some(AxisExtent { min: 0.0, max: 100.0 }),
        Stacking::None => {
            let mut it = series.iter().flat_map(|s| s.iter().copied()).filter(|v| v.is_finite());
            let first = it.next()?;
            let (min, max) = it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
            Some(AxisExtent { min, max })
        }
        Stacking::Normal => {
            let len = series.iter().map(|s| s.len()).max().unwrap_or(0);
            let mut out: Option<AxisExtent> = None;
            for i in 0..len {
                let mut pos = 0.0;
                let mut neg = 0.0;
                let mut any = false;
                for v in series.iter().filter_map(|s| s.get(i)).copied() {
                    if !v.is_finite() {
                        continue;
                    }
                    any = true;
                    if v < 0.0 {
                        neg += v;
                    } else {
                        pos += v;
                    }
                }
                if !any {
                    continue;
                }
                out = Some(match out {
                    Some(e) => AxisExtent {
                        min: e.min.min(neg),
                        max: e.max.max(pos),
                    },
                    None => AxisExtent { min: neg, max: pos },
                });
            }
            out
        }
    }
}

fn widen_up(v: f64) -> f64 {
    if v > 0.0 {
        v * 2.0
    } else if v < 0.0 {
        v * 0.5
    } else {
        1.0
    }
}

fn widen_down(v: f64) -> f64 {
    if v > 0.0 {
        v * 0.5
    } else if v < 0.0 {
        v * 2.0
    } else {
        -1.0
    }
}

/// Reconcile the auto extent with explicit bounds. Returns the (min, max) to emit;
/// a side is `None` only when there is neither data nor an explicit bound.
pub fn finalize_extent(
    raw: Option<AxisExtent>,
    stacking: Stacking,
    rules: ExtentRules,
) -> (Option<f64>, Option<f64>) {
    let (emin, emax) = (rules.explicit_min, rules.explicit_max);

    // 1) auto extent, pushed away from an explicit bound that would invert it
    let auto = raw.map(|mut e| {
        if let Some(lo) = emin
            && lo >= e.max
        {
            e.max = widen_up(lo);
        }
        if let Some(hi) = emax
            && hi <= e.min
        {
            e.min = widen_down(hi);
        }
        if stacking != Stacking::Percent {
            // 2) column/bar baseline
            if rules.clamp_to_zero && e.min > 0.0 {
                e.min = 0.0;
            }
            // 3) value-label headroom
            if rules.value_labels {
                let half = (e.max - e.min) * 0.1 / 2.0;
                if e.max >= 0.0 {
                    e.max += half;
                }
                if e.min < 0.0 {
                    e.min -= half;
                }
            }
        }
        e
    });

    // 4) explicit wins per side
    let min = emin.or(auto.map(|e| e.min));
    let mut max = emax.or(auto.map(|e| e.max));

    // Both bounds explicit and inverted: keep the min, widen the max.
    if let (Some(lo), Some(hi)) = (min, max)
        && lo > hi
    {
        max = Some(widen_up(lo));
    }
    (min, max)
}

/// [`raw_extent`] followed by [`finalize_extent`].
pub fn auto_extent(
    series: &[&[f64]],
    stacking: Stacking,
    rules: ExtentRules,
) -> (Option<f64>, Option<f64>) {
    finalize_extent(raw_extent(series, stacking), stacking, rules)
}
