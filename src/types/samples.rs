//! Located samples produced by the capture collaborator.
//!
//! A sample is a visually-detected region of the captured asset annotated
//! with its bounds and the centroid used as the overlay marker anchor.

use serde::{Deserialize, Serialize};

use super::core::{Bounds, Point, Rgb};
use super::tokens::css_value;

/// A sampled color region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedColor {
    pub rgb: Rgb,
    /// Hex as reported by the capture step; the engine re-derives it from `rgb` when rendering.
    #[serde(default)]
    pub hex: String,
    pub bounds: Bounds,
    pub centroid: Point,
    /// Share of the asset covered by this color, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

impl LocatedColor {
    pub fn new(rgb: Rgb, bounds: Bounds, centroid: Point) -> Self {
        Self {
            rgb,
            hex: rgb.to_hex(),
            bounds,
            centroid,
            coverage: None,
        }
    }

    /// Upper-case `#RRGGBB` of the sampled color.
    pub fn display_hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// A sampled text region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedFont {
    pub font_family: String,
    #[serde(deserialize_with = "css_value")]
    pub font_size: String,
    #[serde(deserialize_with = "css_value")]
    pub font_weight: String,
    pub bounds: Bounds,
    pub centroid: Point,
}

impl LocatedFont {
    /// Compact `family size/weight` description used in messages and fixes.
    pub fn describe(&self) -> String {
        format!(
            "{} {}/{}",
            self.font_family, self.font_size, self.font_weight
        )
    }
}
