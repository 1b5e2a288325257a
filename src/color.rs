//! Color math used by the resolver: parsing and hex formatting, linear
//! interpolation, and HSL fading for blurred points.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Hsl {
    h_deg: f64, // 0..360
    s: f64,     // 0..1
    l: f64,     // 0..1
}

impl Rgb8 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB`, `#RRGGBB`, `rgb(r, g, b)` / `rgba(r, g, b, a)` or one of a few CSS names.
    pub fn parse(s: &str) -> Option<Self> {
        static HEX: OnceLock<Regex> = OnceLock::new();
        static FUNC: OnceLock<Regex> = OnceLock::new();
        let hex = HEX.get_or_init(|| {
            Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
        });
        let func = FUNC.get_or_init(|| {
            Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(,\s*[\d.]+\s*)?\)$")
                .expect("valid rgb() regex")
        });

        let s = s.trim();
        if let Some(caps) = hex.captures(s) {
            let digits = &caps[1];
            let expanded: String = if digits.len() == 3 {
                digits.chars().flat_map(|c| [c, c]).collect()
            } else {
                digits.to_string()
            };
            let v = u32::from_str_radix(&expanded, 16).ok()?;
            return Some(Rgb8::new((v >> 16) as u8, (v >> 8) as u8, v as u8));
        }
        if let Some(caps) = func.captures(s) {
            let channel = |i: usize| caps[i].parse::<u16>().ok().map(|v| v.min(255) as u8);
            return Some(Rgb8::new(channel(1)?, channel(2)?, channel(3)?));
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Some(Rgb8::new(0, 0, 0)),
            "white" => Some(Rgb8::new(255, 255, 255)),
            "red" => Some(Rgb8::new(255, 0, 0)),
            "green" => Some(Rgb8::new(0, 128, 0)),
            "blue" => Some(Rgb8::new(0, 0, 255)),
            "gray" | "grey" => Some(Rgb8::new(128, 128, 128)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Normalize any parseable color to `#RRGGBB`; unparseable input is returned unchanged.
pub fn normalize(color: &str) -> String {
    Rgb8::parse(color)
        .map(|c| c.to_hex())
        .unwrap_or_else(|| color.to_string())
}

/// Linear RGB interpolation; `t` is clamped to 0..1.
pub fn interpolate(from: Rgb8, to: Rgb8, t: f64) -> Rgb8 {
    let t = clamp01(t);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb8::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}

/// Lighten a color towards white in HSL space. Used for de-emphasized (blurred) points.
pub fn fade(color: &str, amount: f64) -> String {
    match Rgb8::parse(color) {
        Some(rgb) => {
            let hsl = rgb8_to_hsl(rgb);
            let faded = Hsl {
                l: clamp01(hsl.l + (1.0 - hsl.l) * clamp01(amount)),
                ..hsl
            };
            hsl_to_rgb8(faded).to_hex()
        }
        None => color.to_string(),
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn rgb8_to_hsl(rgb: Rgb8) -> Hsl {
    let (r, g, b) = (
        rgb.r as f64 / 255.0,
        rgb.g as f64 / 255.0,
        rgb.b as f64 / 255.0,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;
    if delta == 0.0 {
        return Hsl { h_deg: 0.0, s: 0.0, l };
    }
    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let hue = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    Hsl {
        h_deg: hue.rem_euclid(360.0),
        s,
        l,
    }
}

/// Chroma form of HSL to RGB: pick the hue sector, then shift by the lightness offset.
fn hsl_to_rgb8(hsl: Hsl) -> Rgb8 {
    let (s, l) = (clamp01(hsl.s), clamp01(hsl.l));
    let sector = hsl.h_deg.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let offset = l - chroma / 2.0;
    let channel = |v: f64| (clamp01(v + offset) * 255.0).round() as u8;
    Rgb8::new(channel(r), channel(g), channel(b))
}
