use clap::Parser;

use super::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["orphan", "src"]).expect("default args should parse");

    assert_eq!(args.paths, vec![std::path::PathBuf::from("src")]);
    assert!(args.config.is_none());
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.jobs, None);
    assert!(!args.no_suppress);
}

#[test]
fn parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "orphan",
        "--config",
        "configs/orphan.json",
        "--format",
        "JSON",
        "--jobs",
        "4",
        "--no-suppress",
        "--no-color",
        "a.orp",
        "lib",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("configs/orphan.json"))
    );
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.jobs, Some(4));
    assert!(args.no_suppress);
    assert!(args.no_color);
    assert_eq!(args.paths.len(), 2);
}

#[test]
fn requires_a_path() {
    assert!(CliArgs::try_parse_from(["orphan"]).is_err());
}

#[test]
fn parses_logging_options() {
    let args = CliArgs::try_parse_from(["orphan", "--log", "orphan_checker=trace", "--log-format", "Tree", "src"])
        .expect("logging args should parse");
    assert_eq!(args.log.as_deref(), Some("orphan_checker=trace"));
    assert_eq!(args.log_format, Some(crate::tracing_config::LogFormat::Tree));

    let args = CliArgs::try_parse_from(["orphan", "src"]).expect("default args should parse");
    assert!(args.log.is_none());
    assert!(args.log_format.is_none());
}
