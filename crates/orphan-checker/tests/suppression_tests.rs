//! Role-based suppression of finished diagnostics.

mod common;

use common::Fixture;
use orphan_checker::{
    DeclarationMetadata, Diagnostic, NoSuppression, RolePolicy, RuleId, SuppressionPolicy,
};
use orphan_common::Span;

fn metadata(name: &str, annotations: &[&str]) -> DeclarationMetadata {
    DeclarationMetadata {
        name: name.to_string(),
        annotations: annotations.iter().map(|a| a.to_string()).collect(),
    }
}

fn diagnostic_in(metadata: Option<DeclarationMetadata>) -> Diagnostic {
    Diagnostic {
        rule: RuleId::DanglingInvocation,
        span: Span::new(0, 12),
        enclosing: metadata,
        expression_text: "handleCall()".to_string(),
    }
}

#[test]
fn test_role_detection() {
    assert!(RolePolicy::is_test(&metadata("Runs", &["Fact"])));
    assert!(RolePolicy::is_test(&metadata("Runs", &["theory"])));
    assert!(!RolePolicy::is_test(&metadata("TestSomething", &[])));

    assert!(RolePolicy::is_event_handler(&metadata("OnClick", &[])));
    assert!(RolePolicy::is_event_handler(&metadata("ClickHandler", &[])));
    assert!(RolePolicy::is_event_handler(&metadata("Refresh", &["event"])));
    assert!(!RolePolicy::is_event_handler(&metadata("Online", &[])));
    assert!(!RolePolicy::is_event_handler(&metadata("Handler", &[])));

    assert!(RolePolicy::is_teardown(&metadata("DisposeAsync", &[])));
    assert!(RolePolicy::is_teardown(&metadata("Reset", &["teardown"])));
    assert!(!RolePolicy::is_teardown(&metadata("Disposer", &[])));
}

#[test]
fn test_disabled_roles_are_not_suppressed() {
    let policy = RolePolicy {
        tests: false,
        event_handlers: true,
        teardown: false,
    };
    let diagnostic = diagnostic_in(None);
    assert!(!policy.should_suppress(&diagnostic, &metadata("Run", &["test"])));
    assert!(policy.should_suppress(&diagnostic, &metadata("OnLoad", &[])));
    assert!(!policy.should_suppress(&diagnostic, &metadata("Dispose", &[])));
}

#[test]
fn test_top_level_findings_are_kept() {
    let kept = RolePolicy::default().filter(vec![diagnostic_in(None)]);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_filter_over_analysis() {
    let fixture = Fixture::file(
        "@test\nasync fn Runs() { handleCall(); }\n\
         async fn OnClick() { handleCall(); }\n\
         fn Dispose() { handleCall(); }\n\
         async fn Work() { handleCall(); await valueCall(); }\n",
    );
    let diagnostics = fixture.diagnostics();
    assert_eq!(diagnostics.len(), 5);

    assert_eq!(NoSuppression.filter(diagnostics.clone()), diagnostics);

    let kept = RolePolicy::default().filter(diagnostics);
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|d| d.enclosing_declaration() == Some("Work")));
}

#[test]
fn test_policy_deserializes_with_defaults() {
    let policy: RolePolicy = serde_json::from_str(r#"{ "eventHandlers": false }"#).expect("json");
    assert_eq!(
        policy,
        RolePolicy {
            tests: true,
            event_handlers: false,
            teardown: true,
        }
    );
}
