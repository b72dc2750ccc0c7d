use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "harmonize",
    version,
    about = "Checks that HarmonyPatch attributes select exactly one member",
    long_about = "Analyzes a symbol model dump of a mod project and reports patches whose \
                  target member or patch role cannot be determined."
)]
pub struct HarmonizeCli {
    #[command(subcommand)]
    pub command: Commands,
}

impl HarmonizeCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report diagnostics for every declaration in a model dump
    Analyze {
        /// Symbol model dump (JSON)
        model: PathBuf,

        /// Configuration file (defaults to harmonize.toml next to the model, if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of worker threads (0 means auto-detect based on CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Write logs to a rotating file instead of stderr
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,
    },
    /// Show what the patch declared by one method resolves to
    Resolve {
        /// Symbol model dump (JSON)
        model: PathBuf,

        /// Method symbol id, e.g. M:Mod.JumpPatch.Prefix
        symbol: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the rules and their severities
    Rules {
        /// Show severities as configured in this file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
