//! Tracing configuration.
//!
//! Logging is off unless a filter is given, either with `--log <FILTER>` or
//! through `ORPHAN_LOG` / `RUST_LOG`. The format comes from `--log-format`,
//! else `ORPHAN_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` output
//! - `tree`: indented span hierarchy via `tracing-tree`, handy for following
//!   one file through parse, bind and analysis
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! orphan --log debug --log-format tree src/
//! ORPHAN_LOG="orphan_checker=trace" orphan src/
//! ```
//!
//! Logs go to stderr; reports own stdout.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Lenient parse for environment values; unknown names mean `Text`.
    pub fn parse(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value.trim(), true).unwrap_or_default()
    }
}

/// Resolved logging setup for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    /// `EnvFilter` directives; `None` leaves logging off.
    pub filter: Option<String>,
    pub format: LogFormat,
    pub ansi: bool,
}

impl TracingSettings {
    /// Merge command-line choices with the environment. The command line
    /// wins; `ORPHAN_LOG` wins over `RUST_LOG`.
    pub fn resolve(
        filter: Option<&str>,
        format: Option<LogFormat>,
        no_color: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let filter = filter
            .map(str::to_string)
            .or_else(|| env("ORPHAN_LOG"))
            .or_else(|| env("RUST_LOG"))
            .filter(|directives| !directives.trim().is_empty());
        let format = format
            .or_else(|| env("ORPHAN_LOG_FORMAT").map(|value| LogFormat::parse(&value)))
            .unwrap_or_default();
        TracingSettings {
            filter,
            format,
            ansi: !no_color,
        }
    }

    pub fn from_env(filter: Option<&str>, format: Option<LogFormat>, no_color: bool) -> Self {
        Self::resolve(filter, format, no_color, |name| std::env::var(name).ok())
    }
}

/// Install the global subscriber described by `settings`. Returns whether
/// one was installed.
pub fn init_tracing(settings: &TracingSettings) -> bool {
    let Some(directives) = settings.filter.as_deref() else {
        return false;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_ansi(settings.ansi)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(settings.ansi)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    true
}
