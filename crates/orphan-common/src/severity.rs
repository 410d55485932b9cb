//! Diagnostic severity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How loudly a rule reports.
///
/// `Silent` disables the rule entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Silent,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Silent => "silent",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Severity::Silent)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serde_names() {
        let parsed: Severity = serde_json::from_str("\"silent\"").unwrap();
        assert_eq!(parsed, Severity::Silent);
        assert!(!parsed.is_enabled());
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }
}
