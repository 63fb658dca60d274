use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dqa_lib::output::DQA_OUTPUT_VERSION;
use dqa_lib::{DqaError, DqaOutput, ErrorOutput, MatchStatus};

use crate::cli::OutputFormat;

/// Issues listed in human output before truncating.
const PRETTY_ISSUE_LIMIT: usize = 20;

/// Write output in the requested format.
pub fn write_output(
    body: &DqaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
        OutputFormat::Css => match body {
            DqaOutput::Audit(out) => write_text_output(&out.report.css, output.as_deref())?,
            _ => write_json_output(body, output.as_deref())?,
        },
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DqaError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = DqaOutput::Error(ErrorOutput {
        version: DQA_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json | OutputFormat::Css => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is reserved for errors; failing audits use 1.
    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &DqaOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    write_text_output(&content, output)?;
    Ok(())
}

fn write_text_output(content: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &DqaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    write_text_output(&content, output)
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DqaOutput, colorize: bool) -> String {
    match body {
        DqaOutput::Audit(out) => {
            let mut buf = String::new();
            let report = &out.report;
            let stats = &report.stats;
            let status = if out.passed { "PASS" } else { "FAIL" };
            let status_colored = color(status, if out.passed { "32" } else { "31" }, colorize);
            writeln!(
                buf,
                "{} Design QA audit ({} issues: {} fail, {} warn, {} pass)",
                status_colored, stats.total, stats.fail, stats.warn, stats.pass
            )
            .ok();
            writeln!(
                buf,
                "Capture: {} | Tokens: {}",
                out.capture.display(),
                out.tokens.value
            )
            .ok();
            if stats.total > 0 {
                writeln!(
                    buf,
                    "Pass rate: {:.1}% | Fail rate: {:.1}%",
                    stats.pass_rate, stats.fail_rate
                )
                .ok();
            }

            if !report.issues.is_empty() {
                writeln!(buf, "Issues:").ok();
                for issue in report.issues.iter().take(PRETTY_ISSUE_LIMIT) {
                    let label = color(
                        &format!("[{}]", issue.status),
                        status_color_code(issue.status),
                        colorize,
                    );
                    let hint = issue
                        .css_variable()
                        .map(|v| format!(" -> {v}"))
                        .unwrap_or_default();
                    writeln!(
                        buf,
                        "{:>3}. {:6} {:5} {}{}",
                        issue.number, label, issue.issue_type, issue.message, hint
                    )
                    .ok();
                }
                if report.issues.len() > PRETTY_ISSUE_LIMIT {
                    writeln!(
                        buf,
                        "     \u{2026} {} more",
                        report.issues.len() - PRETTY_ISSUE_LIMIT
                    )
                    .ok();
                }
            }

            writeln!(
                buf,
                "Markers: {} standalone, {} clusters",
                report.markers.standalone.len(),
                report.markers.clusters.len()
            )
            .ok();
            let summary = &report.fix_summary;
            writeln!(
                buf,
                "Fixes: {} ({} with selector, {} comment-only)",
                summary.total, summary.with_selector, summary.without_selector
            )
            .ok();
            buf
        }
        DqaOutput::Similar(out) => {
            let mut buf = String::new();
            let header = color("[SIMILAR]", "36", colorize);
            writeln!(
                buf,
                "{} {} token colors within \u{394}E {:.1} of {}",
                header,
                out.matches.len(),
                out.max_delta_e,
                out.color
            )
            .ok();
            for m in &out.matches {
                writeln!(
                    buf,
                    "- {:32} {:9} \u{394}E {:.2}",
                    m.token.path,
                    dqa_lib::types::resolve_token_color(&m.token),
                    m.delta_e
                )
                .ok();
            }
            buf
        }
        DqaOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn status_color_code(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Pass => "32", // green
        MatchStatus::Warn => "33", // yellow
        MatchStatus::Fail => "31", // red
    }
}

/// Determine exit code for the audit command.
pub fn exit_code_for_audit(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
