//! Locale string lookup.
//!
//! The host supplies a [`Translator`]; the crate only needs a handful of keys for
//! tooltip text, the "Others" slice and alert messages. [`DefaultTranslator`] provides
//! English strings, and any `Fn(&str, &[(&str, &str)]) -> String` works as a translator.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub trait Translator {
    /// Look up `key` and substitute `{{name}}` placeholders from `params`.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self(key, params)
    }
}

/// English strings. Unknown keys are returned verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = match key {
            "chart.others" => "Others",
            "chart.total" => "Total",
            "chart.outliers" => "Outliers",
            "tooltip.x" => "X",
            "tooltip.y" => "Y",
            "tooltip.size" => "Size",
            "tooltip.low" => "Low",
            "tooltip.high" => "High",
            "tooltip.min" => "Min",
            "tooltip.q1" => "Lower quartile",
            "tooltip.median" => "Median",
            "tooltip.q3" => "Upper quartile",
            "tooltip.max" => "Max",
            "tooltip.ofFirstStage" => "of first stage",
            "alerts.seriesSliceWarning" => "Showing first {{capacity}} of {{count}} series",
            "alerts.categoriesSliceWarning" => {
                "Showing first {{capacity}} of {{count}} categories"
            }
            other => other,
        };
        interpolate(template, params)
    }
}

/// Replace `{{name}}` placeholders. Unknown placeholders are left in place.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid placeholder regex"));
    re.replace_all(template, |caps: &Captures| {
        params
            .iter()
            .find(|(name, _)| *name == &caps[1])
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_known_params_only() {
        let s = interpolate("{{a}} and {{ b }} and {{c}}", &[("a", "1"), ("b", "2")]);
        assert_eq!(s, "1 and 2 and {{c}}");
    }

    #[test]
    fn closures_are_translators() {
        let t = |key: &str, _: &[(&str, &str)]| format!("<{key}>");
        assert_eq!(t.translate("chart.others", &[]), "<chart.others>");
        assert_eq!(DefaultTranslator.translate("chart.others", &[]), "Others");
    }
}
