//! Optional post-hoc suppression of findings.
//!
//! Rules never consult a policy. A policy filters the finished diagnostic
//! list using the metadata of the enclosing declaration, so turning it off
//! (or swapping it) leaves detection untouched.

use crate::diagnostics::{DeclarationMetadata, Diagnostic};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub trait SuppressionPolicy: Send + Sync {
    fn should_suppress(&self, diagnostic: &Diagnostic, metadata: &DeclarationMetadata) -> bool;

    /// Drop suppressed diagnostics. Findings outside any named callable are kept.
    fn filter(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|diagnostic| match &diagnostic.enclosing {
                Some(metadata) => {
                    let suppressed = self.should_suppress(diagnostic, metadata);
                    if suppressed {
                        trace!(rule = %diagnostic.rule, declaration = %metadata.name, "suppressed");
                    }
                    !suppressed
                }
                None => true,
            })
            .collect()
    }
}

/// Keeps everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSuppression;

impl SuppressionPolicy for NoSuppression {
    fn should_suppress(&self, _: &Diagnostic, _: &DeclarationMetadata) -> bool {
        false
    }
}

const TEST_ANNOTATIONS: [&str; 3] = ["test", "fact", "theory"];
const TEARDOWN_NAMES: [&str; 4] = ["Dispose", "DisposeAsync", "TearDown", "Cleanup"];

/// Exempts declarations by role: tests, event handlers and teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePolicy {
    pub tests: bool,
    pub event_handlers: bool,
    pub teardown: bool,
}

impl Default for RolePolicy {
    fn default() -> Self {
        RolePolicy {
            tests: true,
            event_handlers: true,
            teardown: true,
        }
    }
}

impl RolePolicy {
    pub fn is_test(metadata: &DeclarationMetadata) -> bool {
        TEST_ANNOTATIONS.iter().any(|a| metadata.has_annotation(a))
    }

    /// `OnClick`, `ClickHandler` or `@event`.
    pub fn is_event_handler(metadata: &DeclarationMetadata) -> bool {
        let name = metadata.name.as_str();
        let on_prefix = name
            .strip_prefix("On")
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_uppercase);
        on_prefix || (name.len() > "Handler".len() && name.ends_with("Handler"))
            || metadata.has_annotation("event")
    }

    pub fn is_teardown(metadata: &DeclarationMetadata) -> bool {
        TEARDOWN_NAMES.contains(&metadata.name.as_str()) || metadata.has_annotation("teardown")
    }
}

impl SuppressionPolicy for RolePolicy {
    fn should_suppress(&self, _: &Diagnostic, metadata: &DeclarationMetadata) -> bool {
        (self.tests && Self::is_test(metadata))
            || (self.event_handlers && Self::is_event_handler(metadata))
            || (self.teardown && Self::is_teardown(metadata))
    }
}
