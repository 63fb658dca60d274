//! Design-QA matching engine.
//!
//! Stages, leaf first:
//! - Color matching (CIEDE2000 against the token palette)
//! - Typography matching (weighted family/size/weight score)
//! - Issue taxonomy (severity-sorted, densely numbered)
//! - Marker clustering for overlays
//! - CSS fix resolution against a DOM snapshot
//!
//! Every stage is a pure function of its inputs. [`run_audit`] chains them.

mod clustering;
mod color;
mod fixes;
mod issues;
mod typography;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::capture::CaptureBundle;
use crate::catalogue::TokenCatalogue;
use crate::config::Config;
use crate::types::{ClusteredMarkers, Fix, FixSummary, Issue, IssueStats, TokenSet};
use crate::Result;

// Re-exports
pub use clustering::{cluster_markers, MarkerClusterer, CLUSTER_THRESHOLD};
pub use color::{
    find_similar_colors, match_color, match_colors, match_colors_sync, ColorMatcher, SimilarColor,
};
pub use fixes::{
    consolidate_fixes, determine_property, fix_summary, generate_fixes, resolve_selector,
};
pub use issues::{
    actionable_issues, filter_by_status, filter_by_type, generate_all_issues, generate_issues,
    issue_stats, renumber,
};
pub use typography::{
    match_font, match_fonts, match_fonts_sync, normalize_font_family, parse_font_size,
    FontMatcher, NO_MATCHING_TOKEN,
};

/// Everything the overlay and report collaborators consume for one capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub stats: IssueStats,
    pub issues: Vec<Issue>,
    pub markers: ClusteredMarkers,
    pub fixes: Vec<Fix>,
    pub fix_summary: FixSummary,
    /// Consolidated stylesheet for all fixes
    pub css: String,
}

impl AuditReport {
    pub fn has_failures(&self) -> bool {
        self.stats.fail > 0
    }
}

/// Match, classify, cluster and resolve fixes for one capture.
///
/// `config.report.include_passes` selects complete mode for the issue list;
/// fixes are only generated for actionable issues either way.
pub fn run_audit(capture: &CaptureBundle, tokens: &TokenSet, config: &Config) -> AuditReport {
    let color_matches =
        ColorMatcher::from_config(&config.matching).match_samples(&capture.colors, &tokens.colors);
    let font_matches =
        FontMatcher::from_config(&config.matching).match_samples(&capture.fonts, &tokens.typography);

    let issues = if config.report.include_passes {
        generate_all_issues(&color_matches, &font_matches)
    } else {
        generate_issues(&color_matches, &font_matches)
    };
    let markers = MarkerClusterer::from_config(&config.clustering).cluster(&issues);
    let fixes = generate_fixes(&actionable_issues(&issues), capture.dom());
    let css = consolidate_fixes(&fixes);
    let stats = issue_stats(&issues);

    info!(
        total = stats.total,
        fail = stats.fail,
        warn = stats.warn,
        fixes = fixes.len(),
        "audit complete"
    );

    AuditReport {
        stats,
        fix_summary: fix_summary(&fixes),
        issues,
        markers,
        fixes,
        css,
    }
}

/// Fetches tokens from `catalogue`, then runs [`run_audit`].
pub async fn run_audit_with_catalogue<C: TokenCatalogue>(
    capture: &CaptureBundle,
    catalogue: &C,
    config: &Config,
) -> Result<AuditReport> {
    let tokens = catalogue.token_set().await?;
    Ok(run_audit(capture, &tokens, config))
}
