//! Data types flowing through the matching engine.
//!
//! Inputs come from collaborators (samples, tokens, DOM elements); outputs
//! (matches, issues, clusters, fixes) are plain serializable records.

pub mod core;
pub mod dom;
pub mod issues;
pub mod matches;
pub mod samples;
pub mod tokens;

pub use self::core::{Bounds, Point, Rgb};
pub use dom::DomElement;
pub use issues::{
    ClusteredMarkers, Fix, FixSummary, Issue, IssueSource, IssueStats, IssueType, MarkerCluster,
    Suggestion,
};
pub use matches::{ColorMatch, FontMatch, MatchStatus};
pub use samples::{LocatedColor, LocatedFont};
pub use tokens::{resolve_token_color, ColorToken, ColorTokenValue, TokenSet, TypographyToken};
