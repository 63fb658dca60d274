use std::path::Path;

use dqa_lib::{Config, DqaError};
use tracing::debug;

/// Audit flags that override config values when given.
#[derive(Debug, Default, Clone)]
pub struct AuditOverrides {
    pub include_passes: bool,
    pub cluster_threshold: Option<f64>,
    pub catalogue_url: Option<String>,
}

/// Merge CLI overrides into the loaded config, preferring CLI when a flag is present.
///
/// `--all` can only switch complete mode on; config may already enable it.
pub fn resolve_audit_config(mut config: Config, overrides: &AuditOverrides) -> Result<Config, DqaError> {
    if overrides.include_passes {
        config.report.include_passes = true;
    }
    if let Some(threshold) = overrides.cluster_threshold {
        config.clustering.threshold = threshold;
    }
    if let Some(url) = &overrides.catalogue_url {
        config.catalogue.base_url = Some(url.clone());
    }
    config
        .validate()
        .map_err(|e| DqaError::Config(format!("Invalid flag value: {}", e)))?;
    Ok(config)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dqa/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, DqaError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        DqaError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DqaError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Log effective config (visible with --verbose).
pub fn log_effective_config(config_path: Option<&Path>, config: &Config) {
    debug!("{}", format_effective_config(config, config_path));
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: color pass<={:.1} warn<={:.1}, font-size tolerance={:.1}px, cluster threshold={:.1}px, include passes={}, catalogue={} (timeout {}s)",
        config.matching.color_pass_delta_e,
        config.matching.color_warn_delta_e,
        config.matching.font_size_tolerance,
        config.clustering.threshold,
        config.report.include_passes,
        config.catalogue.base_url.as_deref().unwrap_or("-"),
        config.catalogue.timeout.as_secs(),
    )
}
