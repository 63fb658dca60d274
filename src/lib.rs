//! Design QA (DQA) Library
//!
//! Checks colors and typography sampled from a rendered page or screenshot
//! against a design-system token catalogue, turns mismatches into numbered
//! issues, groups their markers for overlays and proposes CSS fixes.
//!
//! # Module Overview
//!
//! - [`audit`] - Matching engine: color and typography matching, issues, clustering, fixes
//! - [`capture`] - Sampled colors, fonts and DOM snapshot for one asset
//! - [`catalogue`] - Token catalogue sources (files, HTTP, in-memory)
//! - [`color_space`] - CIELAB conversion, CIEDE2000 and CSS color parsing
//! - [`config`] - Configuration file support
//! - [`types`] - Core data types and structures
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use dqa_lib::{run_audit, CaptureBundle, Config, FileCatalogue};
//!
//! # async fn example() -> dqa_lib::Result<()> {
//! let capture = CaptureBundle::load("capture.json".as_ref())?;
//! let tokens = FileCatalogue::new("tokens.yaml").load().await?;
//! let report = run_audit(&capture, &tokens, &Config::default());
//! println!("{} issues, {} fixes", report.stats.total, report.fixes.len());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod capture;
pub mod catalogue;
pub mod color_space;
pub mod config;
mod data_file;
pub mod error;
pub mod output;
pub mod types;

pub use audit::{
    actionable_issues, cluster_markers, consolidate_fixes, determine_property,
    filter_by_status, filter_by_type, find_similar_colors, fix_summary, generate_all_issues,
    generate_fixes, generate_issues, issue_stats, match_color, match_colors, match_colors_sync,
    match_font, match_fonts, match_fonts_sync, normalize_font_family, parse_font_size,
    renumber, resolve_selector, run_audit, run_audit_with_catalogue, AuditReport, ColorMatcher,
    FontMatcher, MarkerClusterer, SimilarColor, CLUSTER_THRESHOLD,
};
pub use capture::CaptureBundle;
pub use catalogue::{
    CatalogueAuth, FileCatalogue, HttpCatalogue, TokenCatalogue, CATALOGUE_TOKEN_ENV,
};
pub use color_space::{delta_e2000, parse_css_color, parse_hex, to_lab, Lab};
pub use config::Config;
pub use data_file::{read_data_file, DataFormat};
pub use error::{DqaError, ErrorCategory, ErrorPayload, Result};
pub use output::{
    AuditOutput, DqaOutput, ErrorOutput, SimilarOutput, TokenSourceDescriptor, TokenSourceKind,
    DQA_OUTPUT_VERSION,
};
pub use types::{
    Bounds, ClusteredMarkers, ColorMatch, ColorToken, DomElement, Fix, FixSummary, FontMatch,
    Issue, IssueStats, IssueType, LocatedColor, LocatedFont, MarkerCluster, MatchStatus, Point,
    Rgb, Suggestion, TokenSet, TypographyToken,
};
