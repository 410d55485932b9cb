//! Text and JSON rendering of a run.

use crate::config::OrphanConfig;
use crate::driver::{FileReport, ProblemKind, RunReport};
use colored::Colorize;
use orphan_common::{LineMap, Severity};
use serde::Serialize;

/// One reported line, shared by both formats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub file: String,
    /// 1-based
    pub line: u32,
    /// 1-based
    pub column: u32,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<String>,
}

/// Flatten a run into records: per file, source problems first, then
/// findings in position order, then a resolver failure if any.
pub fn records(report: &RunReport, config: &OrphanConfig) -> Vec<Record> {
    let mut out = Vec::new();
    for file in &report.files {
        file_records(file, config, &mut out);
    }
    out
}

fn file_records(file: &FileReport, config: &OrphanConfig, out: &mut Vec<Record>) {
    let name = file.path.display().to_string();
    let line_map = LineMap::build(&file.source);
    let position = |offset: u32| {
        let p = line_map.offset_to_position(offset, &file.source);
        (p.line + 1, p.character + 1)
    };

    for problem in &file.problems {
        let (line, column) = position(problem.span.start);
        let prefix = match problem.kind {
            ProblemKind::Syntax => "",
            ProblemKind::Declaration => "declaration: ",
        };
        out.push(Record {
            file: name.clone(),
            line,
            column,
            severity: Severity::Error,
            code: None,
            rule: None,
            message: format!("{prefix}{}", problem.message),
            expression: None,
            enclosing: None,
        });
    }

    for diagnostic in &file.findings {
        let (line, column) = position(diagnostic.span.start);
        out.push(Record {
            file: name.clone(),
            line,
            column,
            severity: config.severity(diagnostic.rule),
            code: Some(diagnostic.rule.code()),
            rule: Some(diagnostic.rule.name()),
            message: diagnostic.message(),
            expression: Some(diagnostic.expression_text.clone()),
            enclosing: diagnostic.enclosing_declaration().map(str::to_string),
        });
    }

    if let Some(err) = &file.resolve_error {
        out.push(Record {
            file: name,
            line: 1,
            column: 1,
            severity: Severity::Error,
            code: None,
            rule: None,
            message: format!("analysis stopped: {err}"),
            expression: None,
            enclosing: None,
        });
    }
}

/// `path(line,col): severity CODE: message`, one per line.
pub fn render_text(report: &RunReport, config: &OrphanConfig, color: bool) -> String {
    let mut lines = Vec::new();
    for record in records(report, config) {
        let severity = paint_severity(record.severity, color);
        let code = match record.code {
            Some(code) if color => format!(" {}", code.bright_blue()),
            Some(code) => format!(" {code}"),
            None => String::new(),
        };
        lines.push(format!(
            "{}({},{}): {severity}{code}: {}",
            record.file, record.line, record.column, record.message
        ));
    }
    lines.join("\n")
}

fn paint_severity(severity: Severity, color: bool) -> String {
    let label = severity.name();
    if !color {
        return label.to_string();
    }
    match severity {
        Severity::Error => label.red().bold().to_string(),
        Severity::Warning => label.yellow().bold().to_string(),
        Severity::Info | Severity::Silent => label.cyan().bold().to_string(),
    }
}

pub fn render_json(report: &RunReport, config: &OrphanConfig) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&records(report, config))
}

/// Closing line for text output.
pub fn summary(report: &RunReport) -> String {
    let findings = report.finding_count();
    let files = report.files.len();
    format!(
        "{findings} finding{} in {files} file{}",
        if findings == 1 { "" } else { "s" },
        if files == 1 { "" } else { "s" }
    )
}
