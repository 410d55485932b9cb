//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depths and tree-walk bounds. Every
//! upward or downward walk in the analyzer is bounded by one of these so a
//! malformed tree (a parent cycle, a pathologically nested expression) can
//! never hang the pass.

/// Maximum number of parent links followed by any upward tree walk.
///
/// Used by the context walker and the enclosing-declaration lookup. Real
/// code never nests this deep; hitting the limit means the tree is
/// malformed and the walk gives up (fails closed).
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;

/// Maximum expression nesting depth for the reference type resolver.
///
/// ```text
/// f(f(f(f(f(f(f(f(f(f(f(f(/* ... */))))))))))));
/// a.b.c.d.e.f.g.h.i.j.k.l.m.n /* ... hundreds of levels ... */;
/// ```
///
/// Exceeding it is a resolver failure, not an unresolved type.
pub const MAX_EXPR_RESOLVE_DEPTH: u32 = 500;

/// Maximum recursion depth for the parser's expression and statement rules.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 256;
