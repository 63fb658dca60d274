use crate::audit::{AuditReport, SimilarColor};
use crate::error::ErrorPayload;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Schema version for output payloads.
pub const DQA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DqaOutput {
    Audit(AuditOutput),
    Similar(SimilarOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenSourceKind {
    File,
    Catalogue,
}

/// Where the design tokens for a run came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSourceDescriptor {
    pub kind: TokenSourceKind,
    pub value: String,
}

impl TokenSourceDescriptor {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: TokenSourceKind::File,
            value: path.into().display().to_string(),
        }
    }

    pub fn catalogue(url: impl Into<String>) -> Self {
        Self {
            kind: TokenSourceKind::Catalogue,
            value: url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditOutput {
    pub version: String,
    pub capture: PathBuf,
    pub tokens: TokenSourceDescriptor,
    /// No issue reached the fail band
    pub passed: bool,
    #[serde(flatten)]
    pub report: AuditReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarOutput {
    pub version: String,
    pub color: String,
    pub max_delta_e: f64,
    #[serde(default)]
    pub matches: Vec<SimilarColor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::types::{ColorToken, IssueStats};

    fn empty_report() -> AuditReport {
        AuditReport {
            stats: IssueStats::default(),
            issues: vec![],
            markers: Default::default(),
            fixes: vec![],
            fix_summary: Default::default(),
            css: String::new(),
        }
    }

    #[test]
    fn audit_output_flattens_report() {
        let output = DqaOutput::Audit(AuditOutput {
            version: DQA_OUTPUT_VERSION.to_string(),
            capture: PathBuf::from("capture.json"),
            tokens: TokenSourceDescriptor::file("tokens.yaml"),
            passed: true,
            report: empty_report(),
        });

        let json = serde_json::to_string(&output).expect("serialize audit output");
        assert!(json.contains("\"mode\":\"audit\""));
        assert!(json.contains("\"tokens\":{\"kind\":\"file\",\"value\":\"tokens.yaml\"}"));
        assert!(json.contains("\"passed\":true"));
        assert!(json.contains("\"fixSummary\":"));
        assert!(json.contains("\"stats\":"));
    }

    #[test]
    fn similar_output_serializes() {
        let output = DqaOutput::Similar(SimilarOutput {
            version: DQA_OUTPUT_VERSION.to_string(),
            color: "#3A80F0".into(),
            max_delta_e: 10.0,
            matches: vec![SimilarColor {
                token: ColorToken::new("Color/Primary/500", "#3B82F6"),
                delta_e: 1.25,
            }],
        });

        let json = serde_json::to_string(&output).expect("serialize similar output");
        assert!(json.contains("\"mode\":\"similar\""));
        assert!(json.contains("\"maxDeltaE\":10.0"));
        assert!(json.contains("\"deltaE\":1.25"));
    }

    #[test]
    fn error_output_serializes() {
        let output = DqaOutput::Error(ErrorOutput {
            version: DQA_OUTPUT_VERSION.to_string(),
            message: Some("boom".into()),
            error: ErrorPayload::new(ErrorCategory::Input, "boom".into(), "Check the path."),
        });

        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"input\""));
        assert!(json.contains("\"remediation\":\"Check the path.\""));
    }
}
