use std::path::PathBuf;
use std::process::ExitCode;

use dqa_lib::output::{SimilarOutput, DQA_OUTPUT_VERSION};
use dqa_lib::{find_similar_colors, parse_css_color, DqaError, DqaOutput, FileCatalogue};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::load_config;

/// Run the similar command.
pub async fn run_similar(
    config_path: Option<PathBuf>,
    color: String,
    tokens: PathBuf,
    max_delta_e: Option<f64>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let max_delta_e = max_delta_e.unwrap_or(config.matching.color_warn_delta_e);
    if !max_delta_e.is_finite() || max_delta_e < 0.0 {
        return render_error(
            DqaError::Config(format!(
                "--max-delta-e must be a finite, non-negative number (got {max_delta_e})"
            )),
            format,
            output.clone(),
        );
    }
    let Some(rgb) = parse_css_color(&color) else {
        return render_error(
            DqaError::parse(format!(
                "Unrecognized color '{color}'. Use #RGB, #RRGGBB or rgb(r, g, b)."
            )),
            format,
            output.clone(),
        );
    };

    let token_set = match FileCatalogue::new(tokens).load().await {
        Ok(set) => set,
        Err(err) => return render_error(err, format, output.clone()),
    };
    let matches = find_similar_colors(rgb, &token_set.colors, max_delta_e);
    debug!(
        color = %rgb.to_hex(),
        candidates = token_set.colors.len(),
        matches = matches.len(),
        "similar colors"
    );

    let body = DqaOutput::Similar(SimilarOutput {
        version: DQA_OUTPUT_VERSION.to_string(),
        color: rgb.to_hex(),
        max_delta_e,
        matches,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(DqaError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
