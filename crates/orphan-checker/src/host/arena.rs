//! Adapter for the reference host: `NodeArena` syntax and binder typing.

use super::{NodeKind, ResolveError, Slot, SyntaxTree, TypeIdentity, TypeResolver};
use orphan_binder::{ExpressionTyper, TypeResolveError};
use orphan_common::Span;
use orphan_parser::syntax_kind_ext::*;
use orphan_parser::{NodeArena, NodeIndex, SyntaxKind};
use orphan_solver::type_queries;
use orphan_solver::{TypeFormatter, TypeId, TypeInterner};
use smallvec::SmallVec;

/// `SyntaxTree` over one parsed file.
#[derive(Clone, Copy)]
pub struct ArenaTree<'a> {
    arena: &'a NodeArena,
    root: NodeIndex,
}

impl<'a> ArenaTree<'a> {
    pub fn new(arena: &'a NodeArena, root: NodeIndex) -> Self {
        ArenaTree { arena, root }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }
}

impl SyntaxTree for ArenaTree<'_> {
    type Node = NodeIndex;

    fn root(&self) -> NodeIndex {
        self.root
    }

    fn kind(&self, node: NodeIndex) -> NodeKind {
        let Some(n) = self.arena.get(node) else {
            return NodeKind::Other;
        };
        match n.kind {
            EXPRESSION_STATEMENT => NodeKind::ExpressionStatement,
            PARENTHESIZED_EXPRESSION => NodeKind::Parenthesized,
            AWAIT_EXPRESSION => NodeKind::Await,
            CALL_EXPRESSION => NodeKind::Invocation,
            PROPERTY_ACCESS_EXPRESSION => NodeKind::MemberAccess,
            ELEMENT_ACCESS_EXPRESSION => NodeKind::ElementAccess,
            BINARY_EXPRESSION => {
                let operator = self
                    .arena
                    .get_binary_expr(n)
                    .and_then(|data| SyntaxKind::try_from_u16(data.operator_token));
                match operator {
                    Some(SyntaxKind::EqualsToken) => NodeKind::Assignment { compound: false },
                    Some(op) if op.is_assignment_operator() => NodeKind::Assignment { compound: true },
                    _ => NodeKind::BinaryOperator,
                }
            }
            PREFIX_UNARY_EXPRESSION => NodeKind::UnaryOperator,
            CONDITIONAL_EXPRESSION => NodeKind::Conditional,
            ARROW_FUNCTION => NodeKind::Lambda,
            FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION => NodeKind::NamedCallable,
            RETURN_STATEMENT | YIELD_STATEMENT => NodeKind::Return,
            VARIABLE_STATEMENT => NodeKind::VariableDeclaration,
            IF_STATEMENT | WHILE_STATEMENT => NodeKind::Branch,
            INTERPOLATION => NodeKind::Interpolation,
            ARRAY_LITERAL => NodeKind::CollectionLiteral,
            _ => NodeKind::Other,
        }
    }

    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.arena.parent(node).into_option()
    }

    fn children(&self, node: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        self.arena.children(node)
    }

    fn slot(&self, parent: NodeIndex, child: NodeIndex) -> Slot {
        let arena = self.arena;
        let Some(p) = arena.get(parent) else {
            return Slot::Other;
        };
        match p.kind {
            CALL_EXPRESSION => match arena.get_call_expr(p) {
                Some(data) if data.expression == child => Slot::Callee,
                Some(data) if data.arguments.iter().any(|a| a == child) => Slot::Argument,
                _ => Slot::Other,
            },
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => match arena.get_access_expr(p) {
                Some(data) if data.expression == child => Slot::Receiver,
                Some(data) if data.name_or_argument == child => {
                    if p.kind == PROPERTY_ACCESS_EXPRESSION {
                        Slot::MemberName
                    } else {
                        Slot::Argument
                    }
                }
                _ => Slot::Other,
            },
            BINARY_EXPRESSION => match arena.get_binary_expr(p) {
                Some(data) if data.left == child => Slot::Left,
                Some(data) if data.right == child => Slot::Right,
                _ => Slot::Other,
            },
            PREFIX_UNARY_EXPRESSION | AWAIT_EXPRESSION => Slot::Operand,
            CONDITIONAL_EXPRESSION => match arena.get_conditional_expr(p) {
                Some(data) if data.condition == child => Slot::Condition,
                Some(data) if data.when_true == child || data.when_false == child => Slot::Branch,
                _ => Slot::Other,
            },
            IF_STATEMENT => match arena.get_if_statement(p) {
                Some(data) if data.condition == child => Slot::Condition,
                Some(_) => Slot::Body,
                None => Slot::Other,
            },
            WHILE_STATEMENT => match arena.get_loop(p) {
                Some(data) if data.condition == child => Slot::Condition,
                Some(_) => Slot::Body,
                None => Slot::Other,
            },
            VARIABLE_STATEMENT => match arena.get_variable(p) {
                Some(data) if data.initializer == child => Slot::Initializer,
                _ => Slot::Other,
            },
            RETURN_STATEMENT | YIELD_STATEMENT | THROW_STATEMENT | PARENTHESIZED_EXPRESSION => {
                Slot::Value
            }
            EXPRESSION_STATEMENT => Slot::Expression,
            ARRAY_LITERAL => Slot::Element,
            INTERPOLATION => Slot::Segment,
            FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION | ARROW_FUNCTION => {
                match arena.get_function(p) {
                    Some(data) if data.body == child => Slot::Body,
                    _ => Slot::Other,
                }
            }
            BLOCK | SOURCE_FILE => Slot::Body,
            _ => Slot::Other,
        }
    }

    fn span(&self, node: NodeIndex) -> Span {
        self.arena.span(node).unwrap_or(Span::DUMMY)
    }

    fn text(&self, node: NodeIndex) -> &str {
        self.arena.node_text(node)
    }

    fn declaration_name(&self, node: NodeIndex) -> Option<&str> {
        let n = self.arena.get(node)?;
        if !matches!(n.kind, FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION) {
            return None;
        }
        let data = self.arena.get_function(n)?;
        let name = self.arena.identifier_text(data.name);
        (!name.is_empty()).then_some(name)
    }

    fn annotations(&self, node: NodeIndex) -> SmallVec<[&str; 2]> {
        let arena = self.arena;
        let Some(data) = arena.get(node).and_then(|n| arena.get_function(n)) else {
            return SmallVec::new();
        };
        data.annotations
            .iter()
            .filter_map(|annotation| arena.get(annotation).and_then(|n| arena.get_wrapped(n)))
            .map(|wrapped| arena.identifier_text(wrapped.expression))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// `TypeIdentity` over the interned type universe.
#[derive(Clone, Copy)]
pub struct InternerIdentity<'a> {
    types: &'a TypeInterner,
}

impl<'a> InternerIdentity<'a> {
    pub fn new(types: &'a TypeInterner) -> Self {
        InternerIdentity { types }
    }
}

impl TypeIdentity for InternerIdentity<'_> {
    type Type = TypeId;

    fn is_error(&self, ty: TypeId) -> bool {
        type_queries::contains_error(self.types, ty)
    }

    fn is_generic_instance(&self, ty: TypeId) -> bool {
        type_queries::is_generic_instance(self.types, ty)
    }

    fn unconstructed_definition(&self, ty: TypeId) -> Option<TypeId> {
        type_queries::unconstructed_definition(self.types, ty)
    }

    fn type_arguments(&self, ty: TypeId) -> SmallVec<[TypeId; 2]> {
        type_queries::type_arguments(self.types, ty)
    }

    fn lookup_definition(&self, name: &str, arity: u32) -> Option<TypeId> {
        self.types.find_definition(name, arity)
    }

    fn display(&self, ty: TypeId) -> String {
        TypeFormatter::new(self.types).format(ty)
    }
}

/// `TypeResolver` backed by the binder's `ExpressionTyper`.
pub struct ArenaResolver<'a> {
    typer: &'a ExpressionTyper<'a>,
    identity: InternerIdentity<'a>,
}

impl<'a> ArenaResolver<'a> {
    pub fn new(typer: &'a ExpressionTyper<'a>) -> Self {
        ArenaResolver {
            typer,
            identity: InternerIdentity::new(typer.types()),
        }
    }
}

impl TypeIdentity for ArenaResolver<'_> {
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

impl TypeResolver for ArenaResolver<'_> {
    type Node = NodeIndex;

    fn resolve(&self, expression: NodeIndex) -> Result<Option<TypeId>, ResolveError> {
        self.typer.type_of(expression).map_err(|err| match err {
            TypeResolveError::DepthExceeded { limit } => ResolveError::DepthExceeded { limit },
            TypeResolveError::UnknownNode(node) => ResolveError::UnknownNode(format!("{node:?}")),
        })
    }
}
