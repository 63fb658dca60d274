//! Issue taxonomy, overlay clusters and CSS fixes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::core::{Bounds, Point, Rgb};
use super::matches::MatchStatus;

/// Which matcher an issue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Color,
    Font,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            IssueType::Color => "color",
            IssueType::Font => "font",
        })
    }
}

/// The value found on the captured asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSource {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<Rgb>,
}

/// The design token an issue should be resolved with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub token_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A numbered, severity-sorted taxonomy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// `issue-<number>`
    pub id: String,
    /// 1-based position after sorting
    pub number: usize,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub status: MatchStatus,
    pub message: String,
    pub marker: Point,
    pub bounds: Bounds,
    pub source: IssueSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Issue {
    pub fn css_variable(&self) -> Option<&str> {
        self.suggestion
            .as_ref()
            .and_then(|s| s.css_variable.as_deref())
    }
}

/// Counts and percentages over an issue list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    pub total: usize,
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
    /// Percent of `total`, 0 for an empty list
    pub pass_rate: f64,
    pub fail_rate: f64,
}

/// Two or more issues whose markers overlap on the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerCluster {
    pub id: String,
    /// Mean of the member markers
    pub position: Point,
    pub issues: Vec<Issue>,
}

/// Overlay placement: issues drawn alone plus grouped clusters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusteredMarkers {
    pub standalone: Vec<Issue>,
    pub clusters: Vec<MarkerCluster>,
}

/// A CSS remediation for one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    pub issue_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    pub property: String,
    pub old_value: String,
    pub new_value: String,
    pub css_code: String,
}

/// Fix counts grouped for report headers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub total: usize,
    pub with_selector: usize,
    pub without_selector: usize,
    pub by_property: BTreeMap<String, usize>,
}
