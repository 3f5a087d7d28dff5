//! CLI parse: clap types for confex. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Confex CLI - export overridden scoped configuration into a config document
#[derive(Parser, Debug)]
#[command(name = "confex")]
#[command(about = "Export overridden scoped configuration values into a portable config document")]
pub struct Cli {
    /// Scopes to export: "all" or a comma-separated list of default, websites, stores
    pub scopes: String,

    /// Comma-separated configuration paths; group and field may be "*" (e.g. trans_email/*/email)
    pub paths: String,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Configuration snapshot dump (overrides snapshot.path)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Factory defaults dump (overrides snapshot.factory_defaults_path)
    #[arg(long)]
    pub factory_defaults: Option<PathBuf>,

    /// Config document to update (overrides document.path)
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Export values even when they equal the factory defaults
    #[arg(long)]
    pub keep_factory_defaults: bool,

    /// Print the resulting document instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
