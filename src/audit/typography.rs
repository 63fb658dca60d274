use tracing::{debug, trace};

use crate::catalogue::TokenCatalogue;
use crate::config::MatchingConfig;
use crate::types::{FontMatch, LocatedFont, MatchStatus, TypographyToken};
use crate::Result;

const FAMILY_POINTS: u8 = 3;
const SIZE_POINTS: u8 = 2;
const WEIGHT_POINTS: u8 = 1;

pub const NO_MATCHING_TOKEN: &str = "No matching typography token found";

/// Scores samples against typography roles (max 6 points) and itemizes mismatches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMatcher {
    /// Largest font-size difference, in px, still treated as a match
    pub size_tolerance: f64,
}

impl Default for FontMatcher {
    fn default() -> Self {
        Self {
            size_tolerance: 2.0,
        }
    }
}

impl FontMatcher {
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self {
            size_tolerance: config.font_size_tolerance,
        }
    }

    pub fn match_samples(&self, samples: &[LocatedFont], tokens: &[TypographyToken]) -> Vec<FontMatch> {
        let matches: Vec<FontMatch> = samples
            .iter()
            .map(|sample| self.match_sample(sample, tokens))
            .collect();
        debug!(
            samples = samples.len(),
            tokens = tokens.len(),
            "matched sampled fonts"
        );
        matches
    }

    pub fn match_sample(&self, sample: &LocatedFont, tokens: &[TypographyToken]) -> FontMatch {
        let mut best: Option<&TypographyToken> = None;
        let mut best_score = 0u8;
        for token in tokens {
            let score = self.score(sample, token);
            if score > best_score {
                best_score = score;
                best = Some(token);
            }
        }

        let issues = match best {
            Some(token) => self.mismatches(sample, token),
            None => vec![NO_MATCHING_TOKEN.to_string()],
        };
        let status = match issues.len() {
            0 => MatchStatus::Pass,
            1 => MatchStatus::Warn,
            _ => MatchStatus::Fail,
        };
        trace!(
            font = %sample.describe(),
            role = best.map(|t| t.role.as_str()).unwrap_or("-"),
            score = best_score,
            %status,
            "font sample"
        );

        FontMatch {
            source: sample.clone(),
            token: best.cloned(),
            status,
            issues,
        }
    }

    pub fn score(&self, sample: &LocatedFont, token: &TypographyToken) -> u8 {
        let mut score = 0;
        if family_matches(sample, token) {
            score += FAMILY_POINTS;
        }
        if self.size_matches(sample, token) {
            score += SIZE_POINTS;
        }
        if sample.font_weight == token.font_weight {
            score += WEIGHT_POINTS;
        }
        score
    }

    fn size_matches(&self, sample: &LocatedFont, token: &TypographyToken) -> bool {
        (parse_font_size(&sample.font_size) - parse_font_size(&token.font_size)).abs()
            <= self.size_tolerance
    }

    fn mismatches(&self, sample: &LocatedFont, token: &TypographyToken) -> Vec<String> {
        let mut issues = Vec::new();
        if !family_matches(sample, token) {
            issues.push(format!(
                "Font family: expected {}, found {}",
                token.font_family, sample.font_family
            ));
        }
        if !self.size_matches(sample, token) {
            issues.push(format!(
                "Font size: expected {}, found {}",
                token.font_size, sample.font_size
            ));
        }
        if sample.font_weight != token.font_weight {
            issues.push(format!(
                "Font weight: expected {}, found {}",
                token.font_weight, sample.font_weight
            ));
        }
        issues
    }
}

fn family_matches(sample: &LocatedFont, token: &TypographyToken) -> bool {
    normalize_font_family(&sample.font_family) == normalize_font_family(&token.font_family)
}

/// First entry of a font stack, unquoted, trimmed and lower-cased.
pub fn normalize_font_family(family: &str) -> String {
    let unquoted: String = family.chars().filter(|c| *c != '"' && *c != '\'').collect();
    unquoted
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Leading numeric prefix of a CSS size (`"14px"` -> 14). No prefix parses to 0.
pub fn parse_font_size(size: &str) -> f64 {
    let s = size.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in s.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

pub fn match_fonts_sync(samples: &[LocatedFont], tokens: &[TypographyToken]) -> Vec<FontMatch> {
    FontMatcher::default().match_samples(samples, tokens)
}

pub fn match_font(sample: &LocatedFont, tokens: &[TypographyToken]) -> FontMatch {
    FontMatcher::default().match_sample(sample, tokens)
}

/// Fetches typography tokens from `catalogue`, then matches synchronously.
pub async fn match_fonts<C: TokenCatalogue>(
    samples: &[LocatedFont],
    catalogue: &C,
) -> Result<Vec<FontMatch>> {
    let tokens = catalogue.typography_tokens().await?;
    Ok(match_fonts_sync(samples, &tokens))
}
