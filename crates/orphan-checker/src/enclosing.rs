//! Enclosing-declaration lookup.

use crate::diagnostics::DeclarationMetadata;
use crate::host::{NodeKind, SyntaxTree};
use orphan_common::limits::MAX_TREE_WALK_ITERATIONS;

/// Nearest enclosing named callable of `node`. Lambdas are transparent.
pub fn enclosing_declaration<T: SyntaxTree + ?Sized>(tree: &T, node: T::Node) -> Option<T::Node> {
    let mut current = tree.parent(node)?;
    for _ in 0..MAX_TREE_WALK_ITERATIONS {
        if tree.kind(current) == NodeKind::NamedCallable {
            return Some(current);
        }
        current = tree.parent(current)?;
    }
    None
}

/// Metadata of the nearest enclosing named callable of `node`.
pub fn declaration_metadata<T: SyntaxTree + ?Sized>(
    tree: &T,
    node: T::Node,
) -> Option<DeclarationMetadata> {
    let declaration = enclosing_declaration(tree, node)?;
    Some(DeclarationMetadata {
        name: tree.declaration_name(declaration)?.to_string(),
        annotations: tree
            .annotations(declaration)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
