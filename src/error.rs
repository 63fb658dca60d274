use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum DqaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Token catalogue error (status: {status:?}): {message}")]
    Catalogue {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DqaError {
    pub fn catalogue(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        DqaError::Catalogue {
            status,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        DqaError::Parse(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DqaError::Io(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DqaError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            DqaError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the catalogue URL (e.g., https://tokens.example.com/api).",
            ),
            DqaError::Catalogue { status, message } => ErrorPayload::new(
                ErrorCategory::Catalogue,
                format!("Token catalogue error (status {:?}): {}", status, message),
                "Check DQA_CATALOGUE_TOKEN, the theme id and the catalogue URL; retry after waiting.",
            ),
            DqaError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check the JSON shape of the capture/token files; run with --verbose for details.",
            ),
            DqaError::Parse(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Use a supported data file (json, yaml, yml, toml).",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Validate the capture/token file against the documented schema.",
                    )
                }
            }
            DqaError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("dqa_catalogue_token") || lower.contains("catalogue token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set DQA_CATALOGUE_TOKEN before fetching tokens from a remote catalogue.",
                    )
                } else if lower.contains("theme") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass --theme together with --catalogue-url, or use --tokens FILE instead.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --capture, --tokens) and config thresholds.",
                    )
                }
            }
            DqaError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<serde_yaml::Error> for DqaError {
    fn from(err: serde_yaml::Error) -> Self {
        DqaError::Parse(format!("YAML: {}", err))
    }
}

impl From<toml::de::Error> for DqaError {
    fn from(err: toml::de::Error) -> Self {
        DqaError::Parse(format!("TOML: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DqaError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Network,
    Catalogue,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_payload_includes_catalogue_token_remediation() {
        let err = DqaError::Config("DQA_CATALOGUE_TOKEN environment variable is empty".to_string());
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Config);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("DQA_CATALOGUE_TOKEN"),
            "expected token remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = DqaError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn config_payload_includes_theme_hint() {
        let err = DqaError::Config("--catalogue-url requires a theme id".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(remediation.contains("--theme"), "got: {remediation}");
    }

    #[test]
    fn config_payload_includes_file_not_found_hint() {
        let err = DqaError::Config("File not found: capture.json".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.to_ascii_lowercase().contains("absolute path"),
            "got: {remediation}"
        );
    }

    #[test]
    fn parse_payload_lists_supported_extensions() {
        let err = DqaError::parse("Unsupported file extension 'csv'");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        let remediation = payload.remediation.unwrap_or_default();
        assert!(remediation.contains("json") && remediation.contains("toml"));
    }

    #[test]
    fn catalogue_payload_mentions_status() {
        let err = DqaError::catalogue(Some(StatusCode::UNAUTHORIZED), "bad token");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Catalogue);
        assert!(payload.message.contains("401"));
    }
}
