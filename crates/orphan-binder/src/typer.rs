//! Expression typing.
//!
//! `ExpressionTyper` computes the type of an expression node on demand.
//! Results are cached per node for the life of the typer, so repeated
//! queries from the rules (and from parallel declaration workers) are cheap.

use crate::declarations::DeclarationTable;
use crate::lowering::TypeLowering;
use crate::scope::{LocalBinding, resolve_local};
use dashmap::DashMap;
use orphan_common::limits::MAX_EXPR_RESOLVE_DEPTH;
use orphan_parser::parser::node::{BinaryExprData, CallExprData, UnaryExprData};
use orphan_parser::syntax_kind_ext::*;
use orphan_parser::{NodeArena, NodeIndex, SyntaxKind};
use orphan_solver::type_queries::{application_parts, awaited_type, instantiate};
use orphan_solver::{TypeId, TypeInterner};
use rustc_hash::FxBuildHasher;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeResolveError {
    #[error("expression nesting exceeds the resolver limit of {limit}")]
    DepthExceeded { limit: u32 },
    #[error("node {0:?} does not exist in this file")]
    UnknownNode(NodeIndex),
}

const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;
const NUMERIC_LITERAL: u16 = SyntaxKind::NumericLiteral as u16;
const STRING_LITERAL: u16 = SyntaxKind::StringLiteral as u16;
const TRUE_KEYWORD: u16 = SyntaxKind::TrueKeyword as u16;
const FALSE_KEYWORD: u16 = SyntaxKind::FalseKeyword as u16;
const NULL_KEYWORD: u16 = SyntaxKind::NullKeyword as u16;

pub struct ExpressionTyper<'a> {
    arena: &'a NodeArena,
    types: &'a TypeInterner,
    table: &'a DeclarationTable,
    cache: DashMap<NodeIndex, Option<TypeId>, FxBuildHasher>,
}

impl<'a> ExpressionTyper<'a> {
    pub fn new(arena: &'a NodeArena, types: &'a TypeInterner, table: &'a DeclarationTable) -> Self {
        ExpressionTyper {
            arena,
            types,
            table,
            cache: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn types(&self) -> &'a TypeInterner {
        self.types
    }

    pub fn table(&self) -> &'a DeclarationTable {
        self.table
    }

    /// Type of `expression`; `Ok(None)` when it cannot be determined.
    pub fn type_of(&self, expression: NodeIndex) -> Result<Option<TypeId>, TypeResolveError> {
        self.resolve(expression, 0)
    }

    fn resolve(&self, node: NodeIndex, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        if depth > MAX_EXPR_RESOLVE_DEPTH {
            return Err(TypeResolveError::DepthExceeded {
                limit: MAX_EXPR_RESOLVE_DEPTH,
            });
        }
        if let Some(cached) = self.cache.get(&node) {
            return Ok(*cached);
        }
        let result = self.compute(node, depth)?;
        trace!(?node, ?result, "typed expression");
        self.cache.insert(node, result);
        Ok(result)
    }

    fn compute(&self, index: NodeIndex, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        let arena = self.arena;
        let Some(node) = arena.get(index) else {
            return Err(TypeResolveError::UnknownNode(index));
        };
        let ty = match node.kind {
            IDENTIFIER => return self.identifier_type(index, depth),
            NUMERIC_LITERAL => Some(TypeId::INT),
            STRING_LITERAL | INTERPOLATED_STRING => Some(TypeId::STRING),
            TRUE_KEYWORD | FALSE_KEYWORD => Some(TypeId::BOOL),
            NULL_KEYWORD => Some(TypeId::NULL),
            ARROW_FUNCTION => Some(TypeId::FUNCTION),
            ARRAY_LITERAL => Some(TypeId::OBJECT),
            MISSING_EXPRESSION => Some(TypeId::ERROR),
            CALL_EXPRESSION => match arena.get_call_expr(node) {
                Some(data) => return self.call_type(data, depth),
                None => None,
            },
            AWAIT_EXPRESSION => match arena.get_unary_expr(node) {
                Some(data) => self
                    .resolve(data.operand, depth + 1)?
                    .and_then(|operand| awaited_type(self.types, operand)),
                None => None,
            },
            PREFIX_UNARY_EXPRESSION => match arena.get_unary_expr(node) {
                Some(data) => return self.prefix_type(data, depth),
                None => None,
            },
            BINARY_EXPRESSION => match arena.get_binary_expr(node) {
                Some(data) => return self.binary_type(data, depth),
                None => None,
            },
            CONDITIONAL_EXPRESSION => match arena.get_conditional_expr(node) {
                Some(data) => return self.resolve(data.when_true, depth + 1),
                None => None,
            },
            PARENTHESIZED_EXPRESSION => match arena.get_wrapped(node) {
                Some(data) => return self.resolve(data.expression, depth + 1),
                None => None,
            },
            // Member and element reads, and anything that is not an expression.
            _ => None,
        };
        Ok(ty)
    }

    fn identifier_type(&self, identifier: NodeIndex, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        let arena = self.arena;
        match resolve_local(arena, identifier) {
            Some(LocalBinding::Variable(statement)) => {
                let Some(data) = arena.get(statement).and_then(|n| arena.get_variable(n)) else {
                    return Ok(None);
                };
                if data.type_annotation.is_some() {
                    return Ok(Some(self.lower(data.type_annotation)));
                }
                if data.initializer.is_some() {
                    return self.resolve(data.initializer, depth + 1);
                }
                Ok(None)
            }
            Some(LocalBinding::Parameter(parameter)) => Ok(arena
                .get(parameter)
                .and_then(|n| arena.get_parameter(n))
                .filter(|p| p.type_annotation.is_some())
                .map(|p| self.lower(p.type_annotation))),
            None => Ok(None),
        }
    }

    fn lower(&self, type_ref: NodeIndex) -> TypeId {
        let mut unknown = Vec::new();
        TypeLowering::new(self.arena, self.types, self.table).lower(type_ref, &mut unknown)
    }

    fn call_type(&self, data: &CallExprData, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        let arena = self.arena;
        let Some(callee) = arena.get(data.expression) else {
            return Ok(None);
        };

        if callee.kind == IDENTIFIER {
            // A local shadows any function of the same name; locals are not callable signatures.
            if resolve_local(arena, data.expression).is_some() {
                return Ok(None);
            }
            let name = arena.identifier_text(data.expression);
            return Ok(self.table.function(name).map(|s| s.return_type));
        }

        if callee.kind != PROPERTY_ACCESS_EXPRESSION {
            return Ok(None);
        }
        let Some(access) = arena.get_access_expr(callee) else {
            return Ok(None);
        };
        let member = arena.identifier_text(access.name_or_argument);

        // `Task.Delay(...)`: receiver names a type rather than a value.
        if let Some(definition) = self.static_receiver(access.expression) {
            return Ok(self
                .table
                .method(definition, member)
                .map(|s| instantiate(self.types, s.return_type, &[])));
        }

        let Some(receiver) = self.resolve(access.expression, depth + 1)? else {
            return Ok(None);
        };
        let (definition, args) = application_parts(self.types, receiver)
            .unwrap_or_else(|| (receiver, Default::default()));
        Ok(self
            .table
            .method(definition, member)
            .map(|s| instantiate(self.types, s.return_type, &args)))
    }

    fn static_receiver(&self, receiver: NodeIndex) -> Option<TypeId> {
        let arena = self.arena;
        if arena.get(receiver)?.kind != IDENTIFIER || resolve_local(arena, receiver).is_some() {
            return None;
        }
        self.table.type_named(arena.identifier_text(receiver), 0)
    }

    fn prefix_type(&self, data: &UnaryExprData, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        if data.operator == SyntaxKind::ExclamationToken as u16 {
            return Ok(Some(TypeId::BOOL));
        }
        self.resolve(data.operand, depth + 1)
    }

    fn binary_type(&self, data: &BinaryExprData, depth: u32) -> Result<Option<TypeId>, TypeResolveError> {
        let Some(operator) = SyntaxKind::try_from_u16(data.operator_token) else {
            return Ok(None);
        };
        if operator == SyntaxKind::EqualsToken {
            return self.resolve(data.right, depth + 1);
        }
        if operator.is_boolean_operator() {
            return Ok(Some(TypeId::BOOL));
        }
        // Compound assignment, `??` and arithmetic keep the left operand's type.
        self.resolve(data.left, depth + 1)
    }
}
