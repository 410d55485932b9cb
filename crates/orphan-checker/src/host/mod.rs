//! Host abstractions.
//!
//! The pass never touches a concrete AST or type checker. It reads syntax
//! through `SyntaxTree` and types through `TypeResolver`; each host
//! toolchain supplies one adapter (`arena` is the one for the reference
//! host language).

use orphan_common::Span;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

pub mod arena;

/// Host-neutral node classification. Only the distinctions the rules and
/// the context walker need are made; everything else is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    ExpressionStatement,
    Parenthesized,
    /// Suspension point (`await e`)
    Await,
    Invocation,
    MemberAccess,
    ElementAccess,
    /// `a = b` (including the `_ = b` discard form) or a compound `a += b`
    Assignment { compound: bool },
    BinaryOperator,
    UnaryOperator,
    Conditional,
    /// Function literal; transparent for enclosing-declaration lookup
    Lambda,
    /// Function, method or local function with a name
    NamedCallable,
    Return,
    VariableDeclaration,
    Branch,
    Interpolation,
    CollectionLiteral,
    Other,
}

/// Role a child plays inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Invoked expression of an invocation
    Callee,
    /// Invocation argument or element-access index
    Argument,
    /// Object of a member or element access
    Receiver,
    MemberName,
    /// Condition of a branching statement or conditional expression
    Condition,
    /// Either branch of a conditional expression
    Branch,
    Body,
    Left,
    Right,
    Operand,
    Initializer,
    /// Value of a return/yield/throw, or the inner expression of parentheses
    Value,
    Element,
    Segment,
    /// Expression of an expression statement
    Expression,
    Other,
}

/// Read-only view of a parsed file.
pub trait SyntaxTree {
    type Node: Copy + Eq + Hash + Debug + Send + Sync;

    fn root(&self) -> Self::Node;
    fn kind(&self, node: Self::Node) -> NodeKind;
    /// `None` for the root and for detached nodes.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    /// Children in source order.
    fn children(&self, node: Self::Node) -> SmallVec<[Self::Node; 4]>;
    /// Role of `child` inside `parent`.
    fn slot(&self, parent: Self::Node, child: Self::Node) -> Slot;
    fn span(&self, node: Self::Node) -> Span;
    /// Source text of `node` as written.
    fn text(&self, node: Self::Node) -> &str;
    /// Name of a `NamedCallable`, `None` for anything else.
    fn declaration_name(&self, node: Self::Node) -> Option<&str>;
    /// Annotation names on a declaration (`@test` yields `test`).
    fn annotations(&self, _node: Self::Node) -> SmallVec<[&str; 2]> {
        SmallVec::new()
    }
}

/// Canonical type identities of the host.
pub trait TypeIdentity {
    type Type: Copy + Eq + Hash + Debug + Send + Sync;

    fn is_error(&self, ty: Self::Type) -> bool;
    fn is_generic_instance(&self, ty: Self::Type) -> bool;
    fn unconstructed_definition(&self, ty: Self::Type) -> Option<Self::Type>;
    fn type_arguments(&self, ty: Self::Type) -> SmallVec<[Self::Type; 2]>;
    /// Identity of the type declared as `name` with `arity` type parameters.
    fn lookup_definition(&self, name: &str, arity: u32) -> Option<Self::Type>;
    /// Human-readable form, for logging only. Never used for matching.
    fn display(&self, ty: Self::Type) -> String;
}

/// Expression typing.
pub trait TypeResolver: TypeIdentity {
    type Node: Copy;

    /// `Ok(None)` when the type cannot be determined.
    fn resolve(&self, expression: Self::Node) -> Result<Option<Self::Type>, ResolveError>;
}

/// The resolver could not answer. Propagates out of the diagnostic stream.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("expression nesting exceeds the resolver limit of {limit}")]
    DepthExceeded { limit: u32 },
    #[error("node does not exist in the tree: {0}")]
    UnknownNode(String),
    #[error("type resolution failed: {0}")]
    Host(String),
}
