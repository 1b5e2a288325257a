//! Tooltip text.
//!
//! Formatting is a pure function of an explicit [`PointContext`] and a [`FormatConfig`];
//! the series builders call it once per point and store the result in
//! `custom.tooltip`.

use crate::format::{NumberFormatConfig, format_number};
use crate::translate::Translator;

/// Values carried by the hovered point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointValues {
    Value(f64),
    Xyz { x: f64, y: f64, z: Option<f64> },
    Range { low: f64, high: f64 },
    Box {
        low: f64,
        q1: f64,
        median: f64,
        q3: f64,
        high: f64,
    },
}

/// Relative share shown next to the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Share {
    /// Percent of the pie total.
    OfTotal(f64),
    /// Percent of the first funnel stage.
    OfFirstStage(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointContext<'a> {
    pub series_name: &'a str,
    /// Category label; on scatter charts, the x label of a category axis.
    pub category: Option<&'a str>,
    /// Scatter y label when the y axis is a category axis.
    pub y_category: Option<&'a str>,
    pub values: PointValues,
    pub share: Option<Share>,
}

impl<'a> PointContext<'a> {
    pub fn new(series_name: &'a str, values: PointValues) -> Self {
        Self {
            series_name,
            category: None,
            y_category: None,
            values,
            share: None,
        }
    }

    pub fn with_category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_y_category(mut self, label: &'a str) -> Self {
        self.y_category = Some(label);
        self
    }

    pub fn with_share(mut self, share: Share) -> Self {
        self.share = Some(share);
        self
    }
}

/// Translated captions, resolved once per compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLabels {
    pub x: String,
    pub y: String,
    pub size: String,
    pub low: String,
    pub high: String,
    pub min: String,
    pub q1: String,
    pub median: String,
    pub q3: String,
    pub max: String,
    pub of_first_stage: String,
}

impl TooltipLabels {
    pub fn translated(translator: &dyn Translator) -> Self {
        let t = |key: &str| translator.translate(key, &[]);
        Self {
            x: t("tooltip.x"),
            y: t("tooltip.y"),
            size: t("tooltip.size"),
            low: t("tooltip.low"),
            high: t("tooltip.high"),
            min: t("tooltip.min"),
            q1: t("tooltip.q1"),
            median: t("tooltip.median"),
            q3: t("tooltip.q3"),
            max: t("tooltip.max"),
            of_first_stage: t("tooltip.ofFirstStage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatConfig {
    pub value_format: NumberFormatConfig,
    pub x_format: NumberFormatConfig,
    pub size_format: NumberFormatConfig,
    pub locale: String,
    pub labels: TooltipLabels,
}

impl FormatConfig {
    pub fn new(value_format: NumberFormatConfig, locale: &str, translator: &dyn Translator) -> Self {
        Self {
            x_format: value_format.clone(),
            size_format: value_format.clone(),
            value_format,
            locale: locale.to_string(),
            labels: TooltipLabels::translated(translator),
        }
    }

    pub fn with_x_format(mut self, f: NumberFormatConfig) -> Self {
        self.x_format = f;
        self
    }

    pub fn with_size_format(mut self, f: NumberFormatConfig) -> Self {
        self.size_format = f;
        self
    }

    fn value(&self, v: f64) -> String {
        format_number(v, &self.value_format, &self.locale)
    }
}

/// Tooltip HTML for one point. Gaps render as an empty value.
pub fn format_point(ctx: &PointContext, cfg: &FormatConfig) -> String {
    let mut lines: Vec<String> = Vec::new();
    let l = &cfg.labels;

    match ctx.values {
        PointValues::Value(v) => {
            if let Some(c) = ctx.category {
                lines.push(c.to_string());
            }
            let mut line = format!("{}: {}", ctx.series_name, cfg.value(v));
            match ctx.share {
                Some(Share::OfTotal(p)) => line.push_str(&format!(" ({})", percent(p, cfg))),
                Some(Share::OfFirstStage(p)) => {
                    line.push_str(&format!(" ({} {})", percent(p, cfg), l.of_first_stage))
                }
                None => {}
            }
            lines.push(line);
        }
        PointValues::Xyz { x, y, z } => {
            lines.push(ctx.series_name.to_string());
            let x_text = match ctx.category {
                Some(c) => c.to_string(),
                None => format_number(x, &cfg.x_format, &cfg.locale),
            };
            let y_text = match ctx.y_category {
                Some(c) => c.to_string(),
                None => cfg.value(y),
            };
            lines.push(format!("{}: {}", l.x, x_text));
            lines.push(format!("{}: {}", l.y, y_text));
            if let Some(z) = z {
                lines.push(format!(
                    "{}: {}",
                    l.size,
                    format_number(z, &cfg.size_format, &cfg.locale)
                ));
            }
        }
        PointValues::Range { low, high } => {
            if let Some(c) = ctx.category {
                lines.push(c.to_string());
            }
            lines.push(ctx.series_name.to_string());
            lines.push(format!("{}: {}", l.low, cfg.value(low)));
            lines.push(format!("{}: {}", l.high, cfg.value(high)));
        }
        PointValues::Box {
            low,
            q1,
            median,
            q3,
            high,
        } => {
            if let Some(c) = ctx.category {
                lines.push(c.to_string());
            }
            for (label, v) in [
                (&l.min, low),
                (&l.q1, q1),
                (&l.median, median),
                (&l.q3, q3),
                (&l.max, high),
            ] {
                lines.push(format!("{label}: {}", cfg.value(v)));
            }
        }
    }
    lines.join("<br/>")
}

/// `p` is already a percentage (0..=100).
fn percent(p: f64, cfg: &FormatConfig) -> String {
    format_number(p / 100.0, &NumberFormatConfig::percent(), &cfg.locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::DefaultTranslator;

    fn cfg() -> FormatConfig {
        FormatConfig::new(NumberFormatConfig::default(), "en", &DefaultTranslator)
    }

    #[test]
    fn value_with_category_and_share() {
        let ctx = PointContext::new("Revenue", PointValues::Value(60.0))
            .with_category("Apples")
            .with_share(Share::OfTotal(60.0));
        assert_eq!(format_point(&ctx, &cfg()), "Apples<br/>Revenue: 60 (60%)");
    }

    #[test]
    fn funnel_share_uses_first_stage_caption() {
        let ctx = PointContext::new("Leads", PointValues::Value(1500.0))
            .with_share(Share::OfFirstStage(12.5));
        assert_eq!(
            format_point(&ctx, &cfg()),
            "Leads: 1.5K (12.5% of first stage)"
        );
    }

    #[test]
    fn bubble_lists_axes() {
        let ctx = PointContext::new(
            "Cities",
            PointValues::Xyz {
                x: 2.0,
                y: 3.5,
                z: Some(10.0),
            },
        );
        assert_eq!(
            format_point(&ctx, &cfg()),
            "Cities<br/>X: 2<br/>Y: 3.5<br/>Size: 10"
        );
    }

    #[test]
    fn gaps_render_empty_value() {
        let ctx = PointContext::new("S", PointValues::Value(f64::NAN)).with_category("B");
        assert_eq!(format_point(&ctx, &cfg()), "B<br/>S: ");
    }

    #[test]
    fn default_captions_are_all_translated() {
        let l = TooltipLabels::translated(&DefaultTranslator);
        let captions = [
            &l.x, &l.y, &l.size, &l.low, &l.high, &l.min, &l.q1, &l.median, &l.q3, &l.max,
            &l.of_first_stage,
        ];
        assert!(captions.iter().all(|c| !c.starts_with("tooltip.")));
        assert_eq!(DefaultTranslator.translate("tooltip.of", &[]), "tooltip.of");
    }
}
