use std::path::PathBuf;
use std::process::ExitCode;

use dqa_lib::output::{AuditOutput, TokenSourceDescriptor, DQA_OUTPUT_VERSION};
use dqa_lib::{
    run_audit_with_catalogue, AuditReport, CaptureBundle, CatalogueAuth, Config, DqaError,
    DqaOutput, FileCatalogue, HttpCatalogue,
};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_audit, render_error, write_output};
use crate::settings::{load_config, log_effective_config, resolve_audit_config, AuditOverrides};

/// Run the audit command.
#[allow(clippy::too_many_arguments)]
pub async fn run_audit_command(
    config_path: Option<PathBuf>,
    capture: PathBuf,
    tokens: Option<PathBuf>,
    catalogue_url: Option<String>,
    theme: Option<String>,
    all: bool,
    cluster_threshold: Option<f64>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let overrides = AuditOverrides {
        include_passes: all,
        cluster_threshold,
        catalogue_url,
    };
    let config = match resolve_audit_config(config, &overrides) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    log_effective_config(config_path.as_deref(), &config);

    debug!(path = %capture.display(), "loading capture bundle");
    let bundle = match CaptureBundle::load(&capture) {
        Ok(bundle) => bundle,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let (report, source) = match audit_with_source(&bundle, tokens, theme, &config).await {
        Ok(result) => result,
        Err(err) => return render_error(err, format, output.clone()),
    };

    let passed = !report.has_failures();
    info!(passed, issues = report.stats.total, "audit finished");
    let body = DqaOutput::Audit(AuditOutput {
        version: DQA_OUTPUT_VERSION.to_string(),
        capture,
        tokens: source,
        passed,
        report,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DqaError::Unknown(err.to_string()), format, output);
    }
    exit_code_for_audit(passed)
}

/// Picks the token catalogue (local file or remote theme) and runs the audit against it.
async fn audit_with_source(
    bundle: &CaptureBundle,
    tokens: Option<PathBuf>,
    theme: Option<String>,
    config: &Config,
) -> Result<(AuditReport, TokenSourceDescriptor), DqaError> {
    if let Some(path) = tokens {
        let catalogue = FileCatalogue::new(path);
        let report = run_audit_with_catalogue(bundle, &catalogue, config).await?;
        return Ok((report, TokenSourceDescriptor::file(catalogue.path())));
    }

    let theme = theme.ok_or_else(|| {
        DqaError::Config("Either --tokens or --theme must be provided".to_string())
    })?;
    let base_url = config.catalogue.base_url.as_deref().ok_or_else(|| {
        DqaError::Config(
            "No token catalogue URL: pass --catalogue-url or set catalogue.base_url in config"
                .to_string(),
        )
    })?;
    let catalogue = HttpCatalogue::with_timeout(
        base_url,
        theme,
        config.catalogue.timeout,
        CatalogueAuth::from_env(),
    )?;
    let url = catalogue.tokens_url()?;
    let report = run_audit_with_catalogue(bundle, &catalogue, config).await?;
    Ok((report, TokenSourceDescriptor::catalogue(url.to_string())))
}
