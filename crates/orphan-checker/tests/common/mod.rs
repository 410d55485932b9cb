//! Shared fixture: parse, bind and analyze a reference-host source file.

#![allow(dead_code)]

use orphan_binder::{BinderState, DeclarationTable, ExpressionTyper, bind_prelude};
use orphan_checker::host::arena::{ArenaResolver, ArenaTree};
use orphan_checker::{Diagnostic, DiagnosticStream, HandleClassifier, HandleShapeConfig, RuleId, RuleSet};
use orphan_parser::parser::node::NodeArena;
use orphan_parser::syntax_kind_ext::*;
use orphan_parser::{NodeIndex, ParseDiagnostic, parse_source};
use orphan_solver::TypeInterner;

pub const HEADER: &str = "\
extern fn handleCall(): Task;
extern fn valueCall(): Task<int>;
extern fn flagCall(): Task<bool>;
extern fn valueTaskCall(): ValueTask<string>;
extern fn process(task: Task): void;
extern fn consume(value: int): void;
extern fn count(): int;
";

pub struct Fixture {
    pub types: TypeInterner,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub table: DeclarationTable,
    pub source: String,
}

impl Fixture {
    /// `body` placed inside `async fn Test()` after the shared header.
    pub fn body(body: &str) -> Fixture {
        Fixture::source(&format!("{HEADER}async fn Test() {{\n{body}\n}}\n"))
    }

    /// A whole file after the shared header.
    pub fn file(items: &str) -> Fixture {
        Fixture::source(&format!("{HEADER}{items}"))
    }

    pub fn source(source: &str) -> Fixture {
        let (fixture, parse_diagnostics) = Fixture::build(source);
        assert!(parse_diagnostics.is_empty(), "{parse_diagnostics:?}");
        fixture
    }

    /// Like `body`, but the source is expected to contain syntax errors.
    pub fn malformed_body(body: &str) -> (Fixture, Vec<ParseDiagnostic>) {
        Fixture::build(&format!("{HEADER}async fn Test() {{\n{body}\n}}\n"))
    }

    fn build(source: &str) -> (Fixture, Vec<ParseDiagnostic>) {
        let types = TypeInterner::new();
        let prelude = bind_prelude(&types);
        let (arena, root, parse_diagnostics) = parse_source("test.orp", source.to_string());
        let bound = BinderState::new(&arena, &types, Some(prelude)).bind_source_file(root);
        assert!(bound.diagnostics.is_empty(), "{:?}", bound.diagnostics);
        let fixture = Fixture {
            types,
            arena,
            root,
            table: bound.table,
            source: source.to_string(),
        };
        (fixture, parse_diagnostics)
    }

    pub fn tree(&self) -> ArenaTree<'_> {
        ArenaTree::new(&self.arena, self.root)
    }

    pub fn typer(&self) -> ExpressionTyper<'_> {
        ExpressionTyper::new(&self.arena, &self.types, &self.table)
    }

    pub fn run(&self, rules: RuleSet) -> Vec<Diagnostic> {
        let typer = self.typer();
        let resolver = ArenaResolver::new(&typer);
        let classifier = HandleClassifier::new(&resolver, &HandleShapeConfig::default());
        let tree = self.tree();
        DiagnosticStream::new(&tree, &resolver, &classifier, rules)
            .collect::<Result<Vec<_>, _>>()
            .expect("analysis")
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.run(RuleSet::all())
    }

    /// All nodes of `kind`, in source order.
    pub fn nodes_of_kind(&self, kind: u16) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = (0..self.arena.len() as u32)
            .map(NodeIndex)
            .filter(|&i| self.arena.get(i).is_some_and(|node| node.kind == kind))
            .collect();
        nodes.sort_by_key(|&i| self.arena.get(i).map(|node| node.pos));
        nodes
    }

    pub fn awaits(&self) -> Vec<NodeIndex> {
        self.nodes_of_kind(AWAIT_EXPRESSION)
    }
}

pub fn count(diagnostics: &[Diagnostic], rule: RuleId) -> usize {
    diagnostics.iter().filter(|d| d.rule == rule).count()
}

pub fn texts(diagnostics: &[Diagnostic], rule: RuleId) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.rule == rule)
        .map(|d| d.expression_text.as_str())
        .collect()
}
