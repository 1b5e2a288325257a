//! Number formatting for axis labels, value labels and tooltips.
//!
//! - Abbreviations (`K`, `M`, `B`, `T`) chosen from the magnitude, each switchable
//! - Locale-aware thousands separators (`30,000` vs `30.000`)
//! - Percent and currency presentation

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormatKind {
    #[default]
    Numbers,
    Currency,
    Percent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Pre,
    Post,
}

/// Number format attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberFormatConfig {
    pub name: NumberFormatKind,
    /// Fixed number of decimals; `None` picks a precision from the magnitude.
    pub decimal_scale: Option<usize>,
    pub kilo: bool,
    pub million: bool,
    pub billion: bool,
    pub trillion: bool,
    pub thousand_separator: bool,
    pub symbol: Option<String>,
    pub symbol_position: SymbolPosition,
}

impl Default for NumberFormatConfig {
    fn default() -> Self {
        Self {
            name: NumberFormatKind::Numbers,
            decimal_scale: None,
            kilo: true,
            million: true,
            billion: true,
            trillion: true,
            thousand_separator: true,
            symbol: None,
            symbol_position: SymbolPosition::Pre,
        }
    }
}

impl NumberFormatConfig {
    pub fn percent() -> Self {
        Self {
            name: NumberFormatKind::Percent,
            ..Self::default()
        }
    }

    pub fn currency(symbol: &str) -> Self {
        Self {
            name: NumberFormatKind::Currency,
            symbol: Some(symbol.to_string()),
            ..Self::default()
        }
    }

    pub fn plain() -> Self {
        Self {
            kilo: false,
            million: false,
            billion: false,
            trillion: false,
            ..Self::default()
        }
    }
}

/// Pick the largest enabled abbreviation for a magnitude. Returns (scale, suffix),
/// e.g. (1e6, "M").
pub fn choose_scale(max_abs: f64, config: &NumberFormatConfig) -> (f64, &'static str) {
    if config.trillion && max_abs >= 1.0e12 {
        (1.0e12, "T")
    } else if config.billion && max_abs >= 1.0e9 {
        (1.0e9, "B")
    } else if config.million && max_abs >= 1.0e6 {
        (1.0e6, "M")
    } else if config.kilo && max_abs >= 1.0e3 {
        (1.0e3, "K")
    } else {
        (1.0, "")
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Automatic precision: fewer decimals for larger magnitudes.
fn auto_precision(v: f64) -> usize {
    let a = v.abs();
    if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    }
}

/// Format a value according to `config`. Gaps (`NaN`) format as an empty string.
pub fn format_number(value: f64, config: &NumberFormatConfig, locale_tag: &str) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let (locale, dec_sep) = map_locale(locale_tag);

    let (v, percent_sign) = match config.name {
        NumberFormatKind::Percent => (value * 100.0, "%"),
        _ => (value, ""),
    };
    let (scale, suffix) = match config.name {
        NumberFormatKind::Percent => (1.0, ""),
        _ => choose_scale(v.abs(), config),
    };
    let scaled = v / scale;
    let precision = config.decimal_scale.unwrap_or_else(|| auto_precision(scaled));

    let fixed = format!("{:.*}", precision, scaled.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (fixed.clone(), None),
    };
    let int_part = if config.thousand_separator {
        int_part
            .parse::<u64>()
            .map(|n| n.to_formatted_string(locale))
            .unwrap_or(int_part)
    } else {
        int_part
    };
    // Trim trailing zeros only for automatic precision.
    let frac_part = frac_part
        .map(|f| {
            if config.decimal_scale.is_none() {
                f.trim_end_matches('0').to_string()
            } else {
                f
            }
        })
        .filter(|f| !f.is_empty());

    let mut body = int_part;
    if let Some(f) = frac_part {
        body.push(dec_sep);
        body.push_str(&f);
    }
    body.push_str(suffix);
    body.push_str(percent_sign);

    let sign = if scaled < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match (&config.name, config.symbol.as_deref()) {
        (NumberFormatKind::Currency, Some(sym)) => match config.symbol_position {
            SymbolPosition::Pre => format!("{sign}{sym}{body}"),
            SymbolPosition::Post => format!("{sign}{body} {sym}"),
        },
        _ => format!("{sign}{body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_and_separates() {
        let cfg = NumberFormatConfig::default();
        assert_eq!(format_number(1_500_000.0, &cfg, "en"), "1.5M");
        assert_eq!(format_number(950.0, &cfg, "en"), "950");
        assert_eq!(format_number(-2_000.0, &cfg, "en"), "-2K");
        let plain = NumberFormatConfig::plain();
        assert_eq!(format_number(1_234_567.0, &plain, "en"), "1,234,567");
        assert_eq!(format_number(1_234_567.0, &plain, "de"), "1.234.567");
    }

    #[test]
    fn percent_and_currency() {
        assert_eq!(format_number(0.125, &NumberFormatConfig::percent(), "en"), "12.5%");
        let usd = NumberFormatConfig {
            decimal_scale: Some(2),
            ..NumberFormatConfig::currency("$")
        };
        assert_eq!(format_number(12.0, &usd, "en"), "$12.00");
    }

    #[test]
    fn gaps_format_empty() {
        assert_eq!(format_number(f64::NAN, &NumberFormatConfig::default(), "en"), "");
    }
}
