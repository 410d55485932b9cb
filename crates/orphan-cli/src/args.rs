use crate::tracing_config::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the orphan binary.
#[derive(Parser, Debug)]
#[command(
    name = "orphan",
    version,
    about = "Finds asynchronous work that is started and abandoned, or awaited and ignored"
)]
pub struct CliArgs {
    /// Source files or directories to analyze (`.orp` files are collected recursively).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Path to an orphan.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Number of worker threads (defaults to the number of CPUs).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Report findings in tests, event handlers and teardown methods too.
    #[arg(long = "no-suppress")]
    pub no_suppress: bool,

    /// Disable coloured output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log filter directives (e.g. `debug`, `orphan_checker=trace`). Overrides ORPHAN_LOG.
    #[arg(long = "log", value_name = "FILTER")]
    pub log: Option<String>,

    /// Log output format. Overrides ORPHAN_LOG_FORMAT.
    #[arg(long = "log-format", value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
