//! Captured-versus-discarded context walk.

mod common;

use common::Fixture;
use orphan_checker::ConsumingContext::{Captured, Discarded};
use orphan_checker::{ConsumingContext, NodeKind, Slot, SyntaxTree, consuming_context};
use orphan_common::Span;
use smallvec::SmallVec;

fn await_contexts(body: &str) -> Vec<ConsumingContext> {
    let fixture = Fixture::body(body);
    let tree = fixture.tree();
    fixture
        .awaits()
        .into_iter()
        .map(|node| consuming_context(&tree, node))
        .collect()
}

#[test]
fn test_statement_discards() {
    assert_eq!(await_contexts("await valueCall();"), vec![Discarded]);
    assert_eq!(await_contexts("((await valueCall()));"), vec![Discarded]);
}

#[test]
fn test_every_consumer_captures() {
    let contexts = await_contexts(
        "var a = await valueCall();\n\
         _ = await valueCall();\n\
         consume(await valueCall());\n\
         if (await flagCall()) { }\n\
         var b = $\"{await valueCall()}\";\n\
         var c = await valueCall() * 2;\n\
         var d = [await valueCall()];\n\
         var e = true ? await valueCall() : 0;\n\
         var f = async () => await valueCall();\n\
         return await valueCall();",
    );
    assert_eq!(contexts.len(), 10);
    assert!(contexts.iter().all(|c| *c == Captured), "{contexts:?}");
}

#[test]
fn test_access_and_invocation_are_transparent() {
    let contexts = await_contexts(
        "(await valueCall()).ToString();\n\
         (await valueCall())[0];\n\
         var n = (await valueCall()).ToString();",
    );
    assert_eq!(contexts, vec![Discarded, Discarded, Captured]);
}

#[test]
fn test_unary_operand_captures() {
    let fixture = Fixture::body("!await flagCall();\n-await valueCall();");
    let tree = fixture.tree();
    let contexts: Vec<_> = fixture
        .awaits()
        .into_iter()
        .map(|node| consuming_context(&tree, node))
        .collect();
    assert_eq!(contexts, vec![Captured, Captured]);
    assert!(fixture.diagnostics().is_empty());
}

#[test]
fn test_context_ignores_siblings() {
    // A later use of the same call does not make the first one captured.
    let contexts = await_contexts("await valueCall();\nvar n = await valueCall();");
    assert_eq!(contexts, vec![Discarded, Captured]);
}

// =============================================================================
// Hand-built trees
// =============================================================================

struct Entry {
    kind: NodeKind,
    parent: Option<u32>,
    slot: Slot,
}

/// Minimal host tree: node `i` is `entries[i]`.
struct MockTree {
    entries: Vec<Entry>,
}

impl MockTree {
    fn entry(&self, node: u32) -> Option<&Entry> {
        self.entries.get(node as usize)
    }
}

impl SyntaxTree for MockTree {
    type Node = u32;

    fn root(&self) -> u32 {
        0
    }

    fn kind(&self, node: u32) -> NodeKind {
        self.entry(node).map_or(NodeKind::Other, |e| e.kind)
    }

    fn parent(&self, node: u32) -> Option<u32> {
        self.entry(node).and_then(|e| e.parent)
    }

    fn children(&self, node: u32) -> SmallVec<[u32; 4]> {
        (0..self.entries.len() as u32)
            .filter(|&child| child != node && self.parent(child) == Some(node))
            .collect()
    }

    fn slot(&self, _parent: u32, child: u32) -> Slot {
        self.entry(child).map_or(Slot::Other, |e| e.slot)
    }

    fn span(&self, _node: u32) -> Span {
        Span::DUMMY
    }

    fn text(&self, _node: u32) -> &str {
        ""
    }

    fn declaration_name(&self, _node: u32) -> Option<&str> {
        None
    }
}

fn entry(kind: NodeKind, parent: Option<u32>, slot: Slot) -> Entry {
    Entry { kind, parent, slot }
}

#[test]
fn test_detached_node_is_captured() {
    let tree = MockTree {
        entries: vec![entry(NodeKind::Await, None, Slot::Other)],
    };
    assert_eq!(consuming_context(&tree, 0), Captured);
}

#[test]
fn test_parent_cycle_terminates() {
    // 0 and 1 are each other's receivers: a malformed tree.
    let tree = MockTree {
        entries: vec![
            entry(NodeKind::MemberAccess, Some(1), Slot::Receiver),
            entry(NodeKind::MemberAccess, Some(0), Slot::Receiver),
        ],
    };
    assert_eq!(consuming_context(&tree, 0), Captured);
}

#[test]
fn test_chain_to_statement_is_discarded() {
    // statement <- invocation <- member access <- await
    let tree = MockTree {
        entries: vec![
            entry(NodeKind::ExpressionStatement, None, Slot::Other),
            entry(NodeKind::Invocation, Some(0), Slot::Expression),
            entry(NodeKind::MemberAccess, Some(1), Slot::Callee),
            entry(NodeKind::Await, Some(2), Slot::Receiver),
        ],
    };
    assert_eq!(consuming_context(&tree, 3), Discarded);
}

#[test]
fn test_unlisted_relation_captures() {
    // statement <- unrecognised expression <- await: the walk stops at the
    // unknown parent instead of climbing to the statement.
    let tree = MockTree {
        entries: vec![
            entry(NodeKind::ExpressionStatement, None, Slot::Other),
            entry(NodeKind::Other, Some(0), Slot::Expression),
            entry(NodeKind::Await, Some(1), Slot::Other),
        ],
    };
    assert_eq!(consuming_context(&tree, 2), Captured);
    assert_eq!(consuming_context(&tree, 1), Discarded);
}
