mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_audit_command, run_similar};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

/// Logs go to stderr so stdout stays a clean JSON/CSS stream.
/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Audit {
            capture,
            tokens,
            catalogue_url,
            theme,
            all,
            cluster_threshold,
            format,
            output,
        } => {
            run_audit_command(
                args.config,
                capture,
                tokens,
                catalogue_url,
                theme,
                all,
                cluster_threshold,
                format,
                output,
            )
            .await
        }
        Commands::Similar {
            color,
            tokens,
            max_delta_e,
            format,
            output,
        } => run_similar(args.config, color, tokens, max_delta_e, format, output).await,
    }
}
