use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audit::{ColorMatcher, FontMatcher, CLUSTER_THRESHOLD};
use crate::error::{DqaError, Result};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub clustering: ClusteringConfig,
    pub report: ReportConfig,
    pub catalogue: CatalogueConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub color_pass_delta_e: f64,
    pub color_warn_delta_e: f64,
    pub font_size_tolerance: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let color = ColorMatcher::default();
        Self {
            color_pass_delta_e: color.pass_threshold,
            color_warn_delta_e: color.warn_threshold,
            font_size_tolerance: FontMatcher::default().size_tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub threshold: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            threshold: CLUSTER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub include_passes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub base_url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// `$HOME/.config/dqa/config.toml`
    pub fn central_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("dqa")
                .join("config.toml"),
        )
    }

    /// Explicit path > central config (if present) > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DqaError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.matching;
        for (name, value) in [
            ("matching.color_pass_delta_e", m.color_pass_delta_e),
            ("matching.color_warn_delta_e", m.color_warn_delta_e),
            ("matching.font_size_tolerance", m.font_size_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DqaError::Config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if m.color_warn_delta_e < m.color_pass_delta_e {
            return Err(DqaError::Config(format!(
                "matching.color_warn_delta_e ({}) must not be below matching.color_pass_delta_e ({})",
                m.color_warn_delta_e, m.color_pass_delta_e
            )));
        }
        let threshold = self.clustering.threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(DqaError::Config(format!(
                "clustering.threshold must be greater than zero (got {threshold})"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values_match_expected() {
        let cfg = Config::default();

        assert!((cfg.matching.color_pass_delta_e - 3.0).abs() < f64::EPSILON);
        assert!((cfg.matching.color_warn_delta_e - 10.0).abs() < f64::EPSILON);
        assert!((cfg.matching.font_size_tolerance - 2.0).abs() < f64::EPSILON);
        assert!((cfg.clustering.threshold - 40.0).abs() < f64::EPSILON);
        assert!(!cfg.report.include_passes);
        assert_eq!(cfg.catalogue.timeout, Duration::from_secs(30));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn defaults_configure_matchers_like_their_own_defaults() {
        let cfg = Config::default();

        assert_eq!(ColorMatcher::from_config(&cfg.matching), ColorMatcher::default());
        assert_eq!(FontMatcher::from_config(&cfg.matching), FontMatcher::default());
        assert_eq!(
            crate::audit::MarkerClusterer::from_config(&cfg.clustering),
            crate::audit::MarkerClusterer::default()
        );
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let cfg = Config::from_toml(
            r#"
            [matching]
            color_warn_delta_e = 12.5

            [report]
            include_passes = true

            [catalogue]
            base_url = "https://tokens.example.com/api"
            timeout = "5s"
            "#,
        )
        .expect("parse config");

        assert!((cfg.matching.color_pass_delta_e - 3.0).abs() < f64::EPSILON);
        assert!((cfg.matching.color_warn_delta_e - 12.5).abs() < f64::EPSILON);
        assert!(cfg.report.include_passes);
        assert_eq!(
            cfg.catalogue.base_url.as_deref(),
            Some("https://tokens.example.com/api")
        );
        assert_eq!(cfg.catalogue.timeout, Duration::from_secs(5));
    }

    #[test]
    fn validate_rejects_inverted_bands() {
        let mut cfg = Config::default();
        cfg.matching.color_pass_delta_e = 12.0;
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("color_warn_delta_e"));
    }

    #[test]
    fn validate_rejects_non_positive_cluster_threshold() {
        let mut cfg = Config::default();
        cfg.clustering.threshold = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[clustering]\nthreshold = 25.0").expect("write config");

        let cfg = Config::load(Some(file.path())).expect("load config");
        assert!((cfg.clustering.threshold - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_reports_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, DqaError::Config(ref msg) if msg.contains("not found")));
    }
}
