//! Per-sample match results.
//!
//! Created by the matchers and consumed once by the issue taxonomy builder.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::samples::{LocatedColor, LocatedFont};
use super::tokens::{ColorToken, TypographyToken};

/// Conformance band of a match. Declaration order is severity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Fail,
    Warn,
    Pass,
}

impl MatchStatus {
    /// 0 for the most severe band.
    pub const fn severity_rank(self) -> u8 {
        match self {
            MatchStatus::Fail => 0,
            MatchStatus::Warn => 1,
            MatchStatus::Pass => 2,
        }
    }

    pub const fn is_actionable(self) -> bool {
        !matches!(self, MatchStatus::Pass)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MatchStatus::Fail => "fail",
            MatchStatus::Warn => "warn",
            MatchStatus::Pass => "pass",
        })
    }
}

/// Result of matching one sampled color against the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMatch {
    pub source: LocatedColor,
    /// Best candidate; `None` only when the palette had no usable token.
    pub token: Option<ColorToken>,
    /// CIEDE2000 distance to `token`; infinite when there is no token.
    #[serde(
        serialize_with = "serialize_delta_e",
        deserialize_with = "deserialize_delta_e"
    )]
    pub delta_e: f64,
    pub status: MatchStatus,
}

/// Result of matching one sampled text region against typography tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMatch {
    pub source: LocatedFont,
    pub token: Option<TypographyToken>,
    pub status: MatchStatus,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl FontMatch {
    /// `var(--font-<role>)` of the selected token.
    pub fn css_variable(&self) -> Option<String> {
        self.token.as_ref().map(TypographyToken::css_variable)
    }
}

// JSON has no infinity; the unbounded distance travels as `null`.
fn serialize_delta_e<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn deserialize_delta_e<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}
