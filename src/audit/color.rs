use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::catalogue::TokenCatalogue;
use crate::color_space::{delta_e2000, parse_hex, to_lab, Lab};
use crate::config::MatchingConfig;
use crate::types::{resolve_token_color, ColorMatch, ColorToken, LocatedColor, MatchStatus, Rgb};
use crate::Result;

/// Bands a CIEDE2000 distance into pass / warn / fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatcher {
    /// ΔE at or below this passes
    pub pass_threshold: f64,
    /// ΔE at or below this (and above `pass_threshold`) warns
    pub warn_threshold: f64,
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self {
            pass_threshold: 3.0,
            warn_threshold: 10.0,
        }
    }
}

/// A palette entry within a caller-supplied ΔE of a looked-up color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarColor {
    pub token: ColorToken,
    pub delta_e: f64,
}

impl ColorMatcher {
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            pass_threshold: config.color_pass_delta_e,
            warn_threshold: config.color_warn_delta_e,
        }
    }

    pub fn status_for(&self, delta_e: f64) -> MatchStatus {
        if delta_e <= self.pass_threshold {
            MatchStatus::Pass
        } else if delta_e <= self.warn_threshold {
            MatchStatus::Warn
        } else {
            MatchStatus::Fail
        }
    }

    /// One match per sample, in sample order. The palette is converted to Lab once.
    pub fn match_samples(&self, samples: &[LocatedColor], tokens: &[ColorToken]) -> Vec<ColorMatch> {
        let palette = prepare_palette(tokens);
        let matches: Vec<ColorMatch> = samples
            .iter()
            .map(|sample| self.match_prepared(sample, &palette))
            .collect();
        debug!(
            samples = samples.len(),
            tokens = palette.len(),
            "matched sampled colors"
        );
        matches
    }

    pub fn match_sample(&self, sample: &LocatedColor, tokens: &[ColorToken]) -> ColorMatch {
        self.match_prepared(sample, &prepare_palette(tokens))
    }

    fn match_prepared(&self, sample: &LocatedColor, palette: &[(&ColorToken, Lab)]) -> ColorMatch {
        let (token, delta_e) = match nearest_token(to_lab(sample.rgb), palette) {
            Some((token, delta_e)) => (Some(token.clone()), delta_e),
            None => (None, f64::INFINITY),
        };
        let status = self.status_for(delta_e);
        trace!(
            hex = %sample.display_hex(),
            token = token.as_ref().map(|t| t.path.as_str()).unwrap_or("-"),
            delta_e,
            %status,
            "color sample"
        );
        ColorMatch {
            source: sample.clone(),
            token,
            delta_e,
            status,
        }
    }
}

/// Tokens whose hex cannot be parsed are left out of the palette.
fn prepare_palette(tokens: &[ColorToken]) -> Vec<(&ColorToken, Lab)> {
    tokens
        .iter()
        .filter_map(|token| {
            let hex = resolve_token_color(token);
            match parse_hex(hex) {
                Some(rgb) => Some((token, to_lab(rgb))),
                None => {
                    warn!(path = %token.path, hex, "skipping color token with unparseable hex");
                    None
                }
            }
        })
        .collect()
}

/// Minimum ΔE; on ties the earlier palette entry wins.
fn nearest_token<'a>(lab: Lab, palette: &[(&'a ColorToken, Lab)]) -> Option<(&'a ColorToken, f64)> {
    let mut best: Option<(&'a ColorToken, f64)> = None;
    for (token, token_lab) in palette {
        let delta_e = delta_e2000(lab, *token_lab);
        let better = match best {
            Some((_, current)) => delta_e < current,
            None => true,
        };
        if better {
            best = Some((*token, delta_e));
        }
    }
    best
}

pub fn match_colors_sync(samples: &[LocatedColor], tokens: &[ColorToken]) -> Vec<ColorMatch> {
    ColorMatcher::default().match_samples(samples, tokens)
}

pub fn match_color(sample: &LocatedColor, tokens: &[ColorToken]) -> ColorMatch {
    ColorMatcher::default().match_sample(sample, tokens)
}

/// Fetches the palette from `catalogue`, then matches synchronously.
pub async fn match_colors<C: TokenCatalogue>(
    samples: &[LocatedColor],
    catalogue: &C,
) -> Result<Vec<ColorMatch>> {
    let tokens = catalogue.color_tokens().await?;
    Ok(match_colors_sync(samples, &tokens))
}

/// Every token within `max_delta_e` of `rgb` (inclusive), nearest first.
pub fn find_similar_colors(rgb: Rgb, tokens: &[ColorToken], max_delta_e: f64) -> Vec<SimilarColor> {
    let lab = to_lab(rgb);
    let mut similar: Vec<SimilarColor> = prepare_palette(tokens)
        .into_iter()
        .filter_map(|(token, token_lab)| {
            let delta_e = delta_e2000(lab, token_lab);
            (delta_e <= max_delta_e).then(|| SimilarColor {
                token: token.clone(),
                delta_e,
            })
        })
        .collect();
    similar.sort_by(|a, b| a.delta_e.total_cmp(&b.delta_e));
    similar
}
