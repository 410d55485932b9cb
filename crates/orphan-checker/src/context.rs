//! Captured-versus-discarded context walk.
//!
//! Looks only at ancestors of the expression: never at sibling statements
//! and never at control flow.

use crate::host::{NodeKind, Slot, SyntaxTree};
use orphan_common::limits::MAX_TREE_WALK_ITERATIONS;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumingContext {
    /// Something stores, returns, passes, tests or combines the value.
    Captured,
    /// The value is the whole of an expression statement.
    Discarded,
}

/// Decide whether the syntax around `expression` consumes its value.
///
/// Parentheses are skipped. Receivers of member or element access and
/// callees of invocations are transparent: the walk continues from the
/// enclosing access or call, so chaining never captures. Every other
/// parent relation captures, and so does a missing parent.
pub fn consuming_context<T: SyntaxTree + ?Sized>(tree: &T, expression: T::Node) -> ConsumingContext {
    let mut node = expression;
    for _ in 0..MAX_TREE_WALK_ITERATIONS {
        let Some(parent) = tree.parent(node) else {
            return ConsumingContext::Captured;
        };
        match tree.kind(parent) {
            NodeKind::Parenthesized => {
                node = parent;
                continue;
            }
            NodeKind::ExpressionStatement => return ConsumingContext::Discarded,
            _ => {}
        }
        match tree.slot(parent, node) {
            Slot::Receiver | Slot::Callee => node = parent,
            slot => {
                trace!(?parent, ?slot, "value captured");
                return ConsumingContext::Captured;
            }
        }
    }
    ConsumingContext::Captured
}
