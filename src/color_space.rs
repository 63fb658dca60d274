//! sRGB -> CIE L*a*b* conversion and CIEDE2000 distance.
//!
//! Conversion goes through `palette` (inverse sRGB gamma, D65 XYZ matrix,
//! XYZ -> Lab). Distance is the full CIEDE2000 formula, never a Euclidean
//! RGB or CIE76 shortcut. Also hosts the CSS color-string parsing the rest of
//! the engine needs.

use palette::{color_difference::Ciede2000, white_point::D65, FromColor, Srgb};

use crate::types::Rgb;

pub type Lab = palette::Lab<D65, f64>;

pub fn to_lab(rgb: Rgb) -> Lab {
    let srgb = Srgb::new(
        f64::from(rgb.r) / 255.0,
        f64::from(rgb.g) / 255.0,
        f64::from(rgb.b) / 255.0,
    );
    Lab::from_color(srgb)
}

/// CIEDE2000 ΔE with unit weighting factors. Symmetric and never negative.
pub fn delta_e2000(a: Lab, b: Lab) -> f64 {
    a.difference(b).max(0.0)
}

/// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (alpha ignored). The `#` is optional.
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let digits = input.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(digits.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Rgb::new(out[0], out[1], out[2]))
        }
        6 | 8 => Some(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

/// Parses `rgb(r, g, b)`, `rgba(r, g, b, a)` and the space-separated
/// `rgb(r g b / a)` form. Channels may be numbers or percentages.
pub fn parse_rgb_function(input: &str) -> Option<Rgb> {
    let lower = input.trim().to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let color_part = inner.split('/').next()?;
    let channels: Vec<&str> = color_part
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if channels.len() < 3 || channels.len() > 4 {
        return None;
    }

    let parse_channel = |raw: &str| -> Option<u8> {
        let value = if let Some(pct) = raw.strip_suffix('%') {
            pct.parse::<f64>().ok()? * 2.55
        } else {
            raw.parse::<f64>().ok()?
        };
        if !value.is_finite() {
            return None;
        }
        Some(value.round().clamp(0.0, 255.0) as u8)
    };

    Some(Rgb::new(
        parse_channel(channels[0])?,
        parse_channel(channels[1])?,
        parse_channel(channels[2])?,
    ))
}

/// Hex or `rgb()`/`rgba()`; anything else is `None`.
pub fn parse_css_color(input: &str) -> Option<Rgb> {
    let trimmed = input.trim();
    if trimmed.starts_with('#') {
        parse_hex(trimmed)
    } else {
        parse_rgb_function(trimmed)
    }
}
