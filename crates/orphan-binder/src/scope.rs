//! Lexical scope lookup.
//!
//! An identifier refers to the nearest preceding `var` in an enclosing block
//! (or the file's top level), or to a parameter of an enclosing callable.
//! Callable boundaries do not stop the search: lambdas and local functions
//! see the locals of the code around them.

use orphan_common::limits::MAX_TREE_WALK_ITERATIONS;
use orphan_parser::syntax_kind_ext::{BLOCK, SOURCE_FILE, VARIABLE_STATEMENT};
use orphan_parser::{NodeArena, NodeIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalBinding {
    /// A VARIABLE_STATEMENT
    Variable(NodeIndex),
    /// A PARAMETER
    Parameter(NodeIndex),
}

/// Resolve the identifier at `identifier` to a local binding.
///
/// `_` is a discard and never binds.
pub fn resolve_local(arena: &NodeArena, identifier: NodeIndex) -> Option<LocalBinding> {
    let name = arena.identifier_text(identifier);
    if name.is_empty() || name == "_" {
        return None;
    }

    let mut child = identifier;
    let mut current = arena.parent(identifier);
    let mut iterations = 0;
    while current.is_some() {
        iterations += 1;
        if iterations > MAX_TREE_WALK_ITERATIONS {
            return None;
        }
        let node = arena.get(current)?;
        match node.kind {
            BLOCK | SOURCE_FILE => {
                if let Some(found) = preceding_variable(arena, current, child, name) {
                    return Some(LocalBinding::Variable(found));
                }
            }
            _ if node.is_function_like() => {
                if let Some(found) = parameter_named(arena, current, name) {
                    return Some(LocalBinding::Parameter(found));
                }
            }
            _ => {}
        }
        child = current;
        current = arena.parent(current);
    }
    None
}

fn statements_of(arena: &NodeArena, container: NodeIndex) -> &[NodeIndex] {
    let Some(node) = arena.get(container) else {
        return &[];
    };
    if let Some(block) = arena.get_block(node) {
        return &block.statements.nodes;
    }
    arena.statements(container)
}

/// Last `var name` declared before `child` in `container`.
fn preceding_variable(
    arena: &NodeArena,
    container: NodeIndex,
    child: NodeIndex,
    name: &str,
) -> Option<NodeIndex> {
    let statements = statements_of(arena, container);
    let position = statements.iter().position(|&s| s == child)?;
    statements[..position].iter().rev().copied().find(|&statement| {
        arena
            .get(statement)
            .filter(|n| n.kind == VARIABLE_STATEMENT)
            .and_then(|n| arena.get_variable(n))
            .is_some_and(|v| arena.identifier_text(v.name) == name)
    })
}

fn parameter_named(arena: &NodeArena, function: NodeIndex, name: &str) -> Option<NodeIndex> {
    let data = arena.get(function).and_then(|n| arena.get_function(n))?;
    data.parameters.iter().find(|&parameter| {
        arena
            .get(parameter)
            .and_then(|n| arena.get_parameter(n))
            .is_some_and(|p| arena.identifier_text(p.name) == name)
    })
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod tests;
