use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqa")]
#[command(
    version,
    about = "Design QA - Check captured colors and typography against design tokens",
    long_about = "Design QA (DQA)\n\nModes:\n- audit: match a capture bundle (sampled colors, fonts, optional DOM snapshot) against a token catalogue and report issues, marker clusters and CSS fixes.\n- similar: list catalogue colors within a CIEDE2000 distance of a given color.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output (debug logs on stderr)")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set defaults for thresholds/clustering/catalogue; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a capture bundle against design tokens
    Audit {
        #[arg(long, help = "Capture bundle (JSON/YAML/TOML) with colors, fonts and optional dom")]
        capture: PathBuf,

        #[arg(
            long,
            conflicts_with_all = ["catalogue_url", "theme"],
            required_unless_present_any = ["catalogue_url", "theme"],
            help = "Token file (JSON/YAML/TOML) with colors and typography"
        )]
        tokens: Option<PathBuf>,

        #[arg(
            long,
            value_name = "URL",
            requires = "theme",
            help = "Token catalogue base URL (overrides catalogue.base_url from config)"
        )]
        catalogue_url: Option<String>,

        #[arg(
            long,
            value_name = "ID",
            help = "Theme identifier in the token catalogue (base URL from --catalogue-url or config)"
        )]
        theme: Option<String>,

        #[arg(long, help = "Include passing samples in the issue list (complete mode)")]
        all: bool,

        #[arg(
            long,
            value_name = "PX",
            help = "Marker clustering distance in pixels (default 40)"
        )]
        cluster_threshold: Option<f64>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// List token colors close to a given color
    Similar {
        #[arg(long, help = "Color to look up (#RGB, #RRGGBB or rgb(...))")]
        color: String,

        #[arg(long, help = "Token file (JSON/YAML/TOML) with colors")]
        tokens: PathBuf,

        #[arg(
            long,
            value_name = "N",
            help = "Largest CIEDE2000 distance to include (default: matching.color_warn_delta_e, 10)"
        )]
        max_delta_e: Option<f64>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    /// Consolidated stylesheet only (audit)
    Css,
}

pub fn parse() -> Cli {
    Cli::parse()
}
