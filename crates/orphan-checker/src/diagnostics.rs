//! Rule identities and diagnostics.

use orphan_common::Span;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    DanglingInvocation,
    UnobservedResult,
}

impl RuleId {
    pub const ALL: [RuleId; 2] = [RuleId::DanglingInvocation, RuleId::UnobservedResult];

    pub fn code(self) -> &'static str {
        match self {
            RuleId::DanglingInvocation => "ORP001",
            RuleId::UnobservedResult => "ORP002",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleId::DanglingInvocation => "dangling-invocation",
            RuleId::UnobservedResult => "unobserved-result",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Name and annotations of the callable a diagnostic was found in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationMetadata {
    pub name: String,
    pub annotations: Vec<String>,
}

impl DeclarationMetadata {
    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a.eq_ignore_ascii_case(annotation))
    }
}

/// One finding. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule: RuleId,
    pub span: Span,
    /// Nearest enclosing named callable; `None` at top level.
    pub enclosing: Option<DeclarationMetadata>,
    /// Source text of the offending expression.
    pub expression_text: String,
}

impl Diagnostic {
    pub fn enclosing_declaration(&self) -> Option<&str> {
        self.enclosing.as_ref().map(|m| m.name.as_str())
    }

    pub fn message(&self) -> String {
        let location = match self.enclosing_declaration() {
            Some(name) => format!(" in '{name}'"),
            None => String::new(),
        };
        match self.rule {
            RuleId::DanglingInvocation => format!(
                "Asynchronous work '{}' is started but never awaited, stored or returned{location}.",
                self.expression_text
            ),
            RuleId::UnobservedResult => format!(
                "The result of '{}' is awaited but never used{location}.",
                self.expression_text
            ),
        }
    }
}
