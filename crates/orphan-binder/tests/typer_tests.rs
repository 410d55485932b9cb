//! Expression typing against the prelude and file declarations.

use orphan_binder::{BinderState, ExpressionTyper, TypeResolveError, bind_prelude};
use orphan_parser::parser::node::NodeArena;
use orphan_parser::syntax_kind_ext::*;
use orphan_parser::{NodeIndex, parse_source};
use orphan_solver::{TypeFormatter, TypeId, TypeInterner};

const HEADER: &str = "\
extern fn handleCall(): Task;
extern fn valueCall(): Task<int>;
extern fn valueTaskCall(): ValueTask<string>;
extern fn count(): int;
";

struct Fixture {
    types: TypeInterner,
    arena: NodeArena,
    table: orphan_binder::DeclarationTable,
}

impl Fixture {
    fn new(body: &str) -> Fixture {
        let types = TypeInterner::new();
        let prelude = bind_prelude(&types);
        let source = format!("{HEADER}fn Test() {{\n{body}\n}}");
        let (arena, root, parse_diagnostics) = parse_source("test.orp", source);
        assert!(parse_diagnostics.is_empty(), "{parse_diagnostics:?}");
        let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
        assert!(bound.diagnostics.is_empty(), "{:?}", bound.diagnostics);
        Fixture {
            types,
            arena,
            table: bound.table,
        }
    }

    /// Expression of the `n`th expression statement in the file.
    fn statement_expression(&self, n: usize) -> NodeIndex {
        let mut statements: Vec<NodeIndex> = (0..self.arena.len() as u32)
            .map(NodeIndex)
            .filter(|&i| self.arena.get(i).is_some_and(|node| node.kind == EXPRESSION_STATEMENT))
            .collect();
        statements.sort_by_key(|&i| self.arena.get(i).map(|node| node.pos));
        let statement = statements[n];
        self.arena
            .get(statement)
            .and_then(|node| self.arena.get_wrapped(node))
            .map(|data| data.expression)
            .expect("expression statement")
    }

    fn type_text(&self, n: usize) -> Option<String> {
        let typer = ExpressionTyper::new(&self.arena, &self.types, &self.table);
        typer
            .type_of(self.statement_expression(n))
            .expect("resolve")
            .map(|ty| TypeFormatter::new(&self.types).format(ty))
    }
}

#[test]
fn test_call_return_types() {
    let fixture = Fixture::new("handleCall(); valueCall(); count(); unknown();");
    assert_eq!(fixture.type_text(0).as_deref(), Some("Task"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("Task<int>"));
    assert_eq!(fixture.type_text(2).as_deref(), Some("int"));
    assert_eq!(fixture.type_text(3), None);
}

#[test]
fn test_await_unwraps_single_argument() {
    let fixture = Fixture::new("await valueCall(); await handleCall(); await valueTaskCall();");
    assert_eq!(fixture.type_text(0).as_deref(), Some("int"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("void"));
    assert_eq!(fixture.type_text(2).as_deref(), Some("string"));
}

#[test]
fn test_receiver_methods_substitute_type_arguments() {
    let fixture = Fixture::new(
        "valueCall().ConfigureAwait(false);\n\
         handleCall().ConfigureAwait(false);\n\
         valueTaskCall().AsTask();\n\
         await valueCall().ConfigureAwait(false);",
    );
    assert_eq!(fixture.type_text(0).as_deref(), Some("ConfiguredTaskAwaitable<int>"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("ConfiguredTaskAwaitable"));
    assert_eq!(fixture.type_text(2).as_deref(), Some("Task<string>"));
    assert_eq!(fixture.type_text(3).as_deref(), Some("int"));
}

#[test]
fn test_static_receiver_call() {
    let fixture = Fixture::new("Task.Delay(10); Task.WhenAny(x);");
    assert_eq!(fixture.type_text(0).as_deref(), Some("Task"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("Task<Task>"));
}

#[test]
fn test_locals_flow_through_scopes() {
    let fixture = Fixture::new(
        "var t = valueCall();\n\
         var a: Task = null;\n\
         t;\n\
         a;\n\
         (t);",
    );
    assert_eq!(fixture.type_text(0).as_deref(), Some("Task<int>"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("Task"));
    assert_eq!(fixture.type_text(2).as_deref(), Some("Task<int>"));
}

#[test]
fn test_operators() {
    let fixture = Fixture::new(
        "var t = handleCall();\n\
         t = valueCall();\n\
         count() == 1;\n\
         count() + 1;\n\
         !t;\n\
         count() > 0 ? valueCall() : handleCall();\n\
         $\"{count()}\";\n\
         () => valueCall();",
    );
    assert_eq!(fixture.type_text(0).as_deref(), Some("Task<int>"));
    assert_eq!(fixture.type_text(1).as_deref(), Some("bool"));
    assert_eq!(fixture.type_text(2).as_deref(), Some("int"));
    assert_eq!(fixture.type_text(3).as_deref(), Some("bool"));
    assert_eq!(fixture.type_text(4).as_deref(), Some("Task<int>"));
    assert_eq!(fixture.type_text(5).as_deref(), Some("string"));
    assert_eq!(fixture.type_text(6).as_deref(), Some("Func"));
}

#[test]
fn test_file_functions_are_visible_everywhere() {
    let types = TypeInterner::new();
    let prelude = bind_prelude(&types);
    let source = "fn Later(): Task<bool> { return null; }\nfn Test() { Later(); Local(); fn Local(): ValueTask { return null; } }";
    let (arena, root, _) = parse_source("test.orp", source);
    let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
    let typer = ExpressionTyper::new(&arena, &types, &bound.table);

    let calls: Vec<NodeIndex> = (0..arena.len() as u32)
        .map(NodeIndex)
        .filter(|&i| arena.get(i).is_some_and(|n| n.kind == CALL_EXPRESSION))
        .collect();
    let formatter = TypeFormatter::new(&types);
    let mut texts: Vec<String> = calls
        .iter()
        .filter_map(|&call| typer.type_of(call).expect("resolve"))
        .map(|ty| formatter.format(ty))
        .collect();
    texts.sort();
    assert_eq!(texts, vec!["Task<bool>", "ValueTask"]);
}

#[test]
fn test_unknown_type_annotation_is_reported_and_errors() {
    let types = TypeInterner::new();
    let prelude = bind_prelude(&types);
    let (arena, root, _) = parse_source("test.orp", "extern fn Broken(): Missing<int>;\nfn T() { Broken(); }");
    let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
    assert_eq!(bound.diagnostics.len(), 1);
    assert!(bound.diagnostics[0].message.contains("Missing<int>"));

    let typer = ExpressionTyper::new(&arena, &types, &bound.table);
    let call = (0..arena.len() as u32)
        .map(NodeIndex)
        .find(|&i| arena.get(i).is_some_and(|n| n.kind == CALL_EXPRESSION))
        .expect("call");
    assert_eq!(typer.type_of(call), Ok(Some(TypeId::ERROR)));
}

#[test]
fn test_unknown_node_is_an_error() {
    let fixture = Fixture::new("handleCall();");
    let typer = ExpressionTyper::new(&fixture.arena, &fixture.types, &fixture.table);
    let missing = NodeIndex(fixture.arena.len() as u32 + 10);
    assert_eq!(typer.type_of(missing), Err(TypeResolveError::UnknownNode(missing)));
}

#[test]
fn test_depth_limit_is_an_error() {
    // Debug builds use large frames; give the typer room to reach its own limit.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let types = TypeInterner::new();
            let prelude = bind_prelude(&types);
            // A chain of variables, each initialised from the previous one.
            let mut source = String::from("fn T() {\nvar v0 = 1;\n");
            for i in 1..=600 {
                source.push_str(&format!("var v{i} = v{};\n", i - 1));
            }
            source.push_str("v600;\n}");
            let (arena, root, _) = parse_source("deep.orp", source);
            let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
            let typer = ExpressionTyper::new(&arena, &types, &bound.table);

            let statement = (0..arena.len() as u32)
                .map(NodeIndex)
                .find(|&i| arena.get(i).is_some_and(|n| n.kind == EXPRESSION_STATEMENT))
                .expect("statement");
            let expression = arena
                .get(statement)
                .and_then(|n| arena.get_wrapped(n))
                .map(|d| d.expression)
                .expect("expression");
            typer.type_of(expression)
        })
        .expect("spawn typer thread");
    let result = handle.join().expect("typer thread");
    assert!(matches!(result, Err(TypeResolveError::DepthExceeded { .. })));
}
