use super::config::OrphanConfig;
use super::driver::analyze_sources;
use super::output::{records, render_json, render_text, summary};
use std::path::PathBuf;

const TEXT: &str = "\
extern fn handleCall(): Task;
extern fn valueCall(): Task<int>;
async fn Run() {
    handleCall();
    await valueCall();
}
";

fn report() -> super::driver::RunReport {
    analyze_sources(
        vec![(PathBuf::from("src/run.orp"), TEXT.to_string())],
        &OrphanConfig::default(),
        true,
    )
}

#[test]
fn text_lines_carry_location_severity_and_code() {
    let rendered = render_text(&report(), &OrphanConfig::default(), false);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("src/run.orp(4,5): warning ORP001: "), "{}", lines[0]);
    assert!(lines[1].starts_with("src/run.orp(5,5): warning ORP002: "), "{}", lines[1]);
    assert!(lines[0].contains("'handleCall()'"));
}

#[test]
fn json_output_is_an_array_of_records() {
    let json = render_json(&report(), &OrphanConfig::default()).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "ORP001");
    assert_eq!(items[0]["rule"], "dangling-invocation");
    assert_eq!(items[0]["severity"], "warning");
    assert_eq!(items[0]["line"], 4);
    assert_eq!(items[1]["expression"], "await valueCall()");
    assert_eq!(items[1]["enclosing"], "Run");
}

#[test]
fn syntax_errors_are_error_records() {
    let report = analyze_sources(
        vec![(PathBuf::from("bad.orp"), "fn Run() { ) }".to_string())],
        &OrphanConfig::default(),
        true,
    );
    let records = records(&report, &OrphanConfig::default());
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.severity.is_error() && r.code.is_none()));
}

#[test]
fn summary_pluralizes() {
    assert_eq!(summary(&report()), "2 findings in 1 file");
}
