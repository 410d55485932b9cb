use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use orphan_cli::args::{CliArgs, OutputFormat};
use orphan_cli::tracing_config::{self, TracingSettings};
use orphan_cli::{config, driver, output};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    // Zero cost unless a filter comes from --log, ORPHAN_LOG or RUST_LOG.
    let logging = TracingSettings::from_env(args.log.as_deref(), args.log_format, args.no_color);
    tracing_config::init_tracing(&logging);
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = config::resolve_config(args.config.as_deref(), &cwd)?;
    let report = driver::run(&args, &config)?;

    match args.format {
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let rendered = output::render_text(&report, &config, color);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
            println!("{}", output::summary(&report));
        }
        OutputFormat::Json => {
            let rendered = output::render_json(&report, &config).context("failed to serialize report")?;
            println!("{rendered}");
        }
    }

    std::process::exit(report.exit_code(&config));
}
