//! Diagnostic stream: ordering, restart, rule selection, failures and
//! parallel analysis.

mod common;

use common::{Fixture, HEADER};
use orphan_checker::host::arena::{ArenaResolver, InternerIdentity};
use orphan_checker::{
    CancellationToken, DiagnosticStream, HandleClassifier, HandleShapeConfig, ResolveError, RuleId,
    RuleSet, TypeIdentity, TypeResolver, analyze_parallel,
};
use orphan_parser::NodeIndex;
use orphan_solver::TypeId;
use smallvec::SmallVec;

const MIXED: &str = "\
handleCall();
await valueCall();
var f = async () => { valueTaskCall(); await valueCall(); };
fn local() { handleCall(); }
await valueCall().ConfigureAwait(false);
";

fn many_declarations(count: usize) -> Fixture {
    let mut items = String::new();
    for i in 0..count {
        items.push_str(&format!(
            "async fn Work{i}() {{\n    handleCall();\n    var n = await valueCall();\n    await valueCall();\n}}\n"
        ));
    }
    Fixture::file(&items)
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let diagnostics = Fixture::body(MIXED).diagnostics();
    assert_eq!(diagnostics.len(), 6);
    let starts: Vec<u32> = diagnostics.iter().map(|d| d.span.start).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_stream_is_idempotent_and_restartable() {
    let fixture = Fixture::body(MIXED);
    let typer = fixture.typer();
    let resolver = ArenaResolver::new(&typer);
    let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
    let tree = fixture.tree();

    let first: Vec<_> = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).collect();
    let second: Vec<_> = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).collect();
    assert_eq!(first, second);

    let mut stream = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all());
    let head: Vec<_> = stream.by_ref().take(2).collect();
    stream.restart();
    let again: Vec<_> = stream.collect();
    assert_eq!(again, first);
    assert_eq!(head, first[..2].to_vec());
}

#[test]
fn test_each_node_reported_once_per_rule() {
    let diagnostics = Fixture::body(MIXED).diagnostics();
    for (i, a) in diagnostics.iter().enumerate() {
        for b in &diagnostics[i + 1..] {
            assert!(a.rule != b.rule || a.span != b.span, "duplicate {a:?}");
        }
    }
}

#[test]
fn test_rule_selection() {
    let fixture = Fixture::body(MIXED);
    let dangling = fixture.run(RuleSet::only(RuleId::DanglingInvocation));
    let unobserved = fixture.run(RuleSet::only(RuleId::UnobservedResult));
    assert_eq!(dangling.len(), 3);
    assert_eq!(unobserved.len(), 3);
    assert!(dangling.iter().all(|d| d.rule == RuleId::DanglingInvocation));
    assert!(unobserved.iter().all(|d| d.rule == RuleId::UnobservedResult));
    assert!(fixture.run(RuleSet::none()).is_empty());
}

// =============================================================================
// Resolver failures
// =============================================================================

/// Delegates to the arena resolver but fails on one node.
struct FailingResolver<'a> {
    inner: ArenaResolver<'a>,
    identity: InternerIdentity<'a>,
    fail_on: NodeIndex,
}

impl TypeIdentity for FailingResolver<'_> {
    type Type = TypeId;

    fn is_error(&self, ty: TypeId) -> bool {
        self.identity.is_error(ty)
    }

    fn is_generic_instance(&self, ty: TypeId) -> bool {
        self.identity.is_generic_instance(ty)
    }

    fn unconstructed_definition(&self, ty: TypeId) -> Option<TypeId> {
        self.identity.unconstructed_definition(ty)
    }

    fn type_arguments(&self, ty: TypeId) -> SmallVec<[TypeId; 2]> {
        self.identity.type_arguments(ty)
    }

    fn lookup_definition(&self, name: &str, arity: u32) -> Option<TypeId> {
        self.identity.lookup_definition(name, arity)
    }

    fn display(&self, ty: TypeId) -> String {
        self.identity.display(ty)
    }
}

impl TypeResolver for FailingResolver<'_> {
    type Node = NodeIndex;

    fn resolve(&self, expression: NodeIndex) -> Result<Option<TypeId>, ResolveError> {
        if expression == self.fail_on {
            return Err(ResolveError::Host("type checker unavailable".to_string()));
        }
        self.inner.resolve(expression)
    }
}

#[test]
fn test_resolver_failure_ends_the_stream() {
    let fixture = Fixture::body("handleCall();\nvalueCall();\nhandleCall();");
    let typer = fixture.typer();
    let second_call = fixture
        .nodes_of_kind(orphan_parser::syntax_kind_ext::CALL_EXPRESSION)
        .into_iter()
        .find(|&node| fixture.arena.node_text(node) == "valueCall()")
        .expect("call");
    let resolver = FailingResolver {
        inner: ArenaResolver::new(&typer),
        identity: InternerIdentity::new(&fixture.types),
        fail_on: second_call,
    };
    let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
    let tree = fixture.tree();

    let results: Vec<_> = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1],
        Err(ResolveError::Host("type checker unavailable".to_string()))
    );

    let parallel = analyze_parallel(&tree, &resolver, &classifier, RuleSet::all(), &CancellationToken::new());
    assert!(matches!(parallel, Err(ResolveError::Host(_))));
}

#[test]
fn test_depth_limit_propagates() {
    // Debug builds use large frames; give the resolver room to reach its own limit.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut body = String::from("var v0 = handleCall();\n");
            for i in 1..=600 {
                body.push_str(&format!("var v{i} = v{};\n", i - 1));
            }
            body.push_str("v600;");
            let fixture = Fixture::source(&format!("{HEADER}fn Deep() {{\n{body}\n}}\n"));
            let typer = fixture.typer();
            let resolver = ArenaResolver::new(&typer);
            let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
            let tree = fixture.tree();
            DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).collect::<Vec<_>>()
        })
        .expect("spawn analysis thread");
    let results = handle.join().expect("analysis thread");
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(ResolveError::DepthExceeded { .. })));
}

// =============================================================================
// Parallel analysis
// =============================================================================

#[test]
fn test_parallel_matches_sequential() {
    let fixture = many_declarations(40);
    let typer = fixture.typer();
    let resolver = ArenaResolver::new(&typer);
    let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
    let tree = fixture.tree();

    let sequential = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all())
        .collect::<Result<Vec<_>, _>>()
        .expect("sequential");
    let analysis = analyze_parallel(&tree, &resolver, &classifier, RuleSet::all(), &CancellationToken::new())
        .expect("parallel");

    assert!(!analysis.cancelled);
    assert_eq!(sequential.len(), 80);
    assert_eq!(analysis.diagnostics, sequential);
}

#[test]
fn test_cancelled_before_start_returns_empty_prefix() {
    let fixture = many_declarations(4);
    let typer = fixture.typer();
    let resolver = ArenaResolver::new(&typer);
    let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
    let tree = fixture.tree();

    let token = CancellationToken::new();
    token.cancel();
    let analysis = analyze_parallel(&tree, &resolver, &classifier, RuleSet::all(), &token).expect("analysis");
    assert!(analysis.cancelled);
    assert_eq!(analysis.completed, 0);
    assert!(analysis.diagnostics.is_empty());

    let sequential: Vec<_> = DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all())
        .with_cancellation(token)
        .collect();
    assert!(sequential.is_empty());
}

#[test]
fn test_cancellation_keeps_completed_declarations() {
    let fixture = many_declarations(6);
    let typer = fixture.typer();
    let resolver = ArenaResolver::new(&typer);
    let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
    let tree = fixture.tree();

    let token = CancellationToken::new();
    let mut stream =
        DiagnosticStream::new(&tree, &resolver, &classifier, RuleSet::all()).with_cancellation(token.clone());
    // Work0 yields two diagnostics; cancel after reading them.
    let first: Vec<_> = stream.by_ref().take(2).collect::<Result<_, _>>().expect("first declaration");
    token.cancel();
    let rest: Vec<_> = stream.collect();

    assert!(first.iter().all(|d| d.enclosing_declaration() == Some("Work0")));
    assert!(rest.is_empty());
}
