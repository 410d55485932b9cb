//! NodeArena access methods.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use crate::scanner::SyntaxKind;
use orphan_common::{Interner, Span};
use smallvec::SmallVec;

macro_rules! pool_getter {
    ($(#[$meta:meta])* $name:ident, $pool:ident, $ty:ty, $($kind:expr),+) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$ty> {
            if node.has_data() && ($(node.kind == $kind)||+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Parent of `index`, NONE for the root or an unknown node.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        if index.is_none() {
            return NodeIndex::NONE;
        }
        self.parents
            .get(index.0 as usize)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Full source text of the parsed file.
    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn span(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(|n| Span::new(n.pos, n.end))
    }

    /// Source text covered by a node.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        self.span(index)
            .map(|span| span.slice(&self.text))
            .unwrap_or("")
    }

    pool_getter!(
        /// Identifier data (identifiers and the `_` discard).
        get_identifier, identifiers, IdentifierData, SyntaxKind::Identifier as u16
    );
    pool_getter!(
        get_literal, literals, LiteralData,
        SyntaxKind::NumericLiteral as u16,
        SyntaxKind::StringLiteral as u16,
        SyntaxKind::InterpolatedText as u16
    );
    pool_getter!(get_source_file, source_files, SourceFileData, SOURCE_FILE);
    pool_getter!(
        /// Function data for `fn`, `extern fn` and lambdas.
        get_function, functions, FunctionData,
        FUNCTION_DECLARATION, EXTERN_FUNCTION_DECLARATION, ARROW_FUNCTION
    );
    pool_getter!(get_type_decl, type_decls, TypeDeclData, EXTERN_TYPE_DECLARATION);
    pool_getter!(get_parameter, parameters, ParameterData, PARAMETER);
    pool_getter!(get_type_ref, type_refs, TypeRefData, TYPE_REFERENCE);
    pool_getter!(get_block, blocks, BlockData, BLOCK);
    pool_getter!(get_variable, variables, VariableData, VARIABLE_STATEMENT);
    pool_getter!(
        get_wrapped, wrapped, WrappedData,
        EXPRESSION_STATEMENT, RETURN_STATEMENT, YIELD_STATEMENT, THROW_STATEMENT,
        PARENTHESIZED_EXPRESSION, INTERPOLATION, ANNOTATION
    );
    pool_getter!(get_if_statement, if_statements, IfStatementData, IF_STATEMENT);
    pool_getter!(get_loop, loops, LoopData, WHILE_STATEMENT);
    pool_getter!(get_call_expr, call_exprs, CallExprData, CALL_EXPRESSION);
    pool_getter!(
        get_access_expr, access_exprs, AccessExprData,
        PROPERTY_ACCESS_EXPRESSION, ELEMENT_ACCESS_EXPRESSION
    );
    pool_getter!(
        get_unary_expr, unary_exprs, UnaryExprData,
        PREFIX_UNARY_EXPRESSION, AWAIT_EXPRESSION
    );
    pool_getter!(get_binary_expr, binary_exprs, BinaryExprData, BINARY_EXPRESSION);
    pool_getter!(
        get_conditional_expr, conditional_exprs, ConditionalExprData, CONDITIONAL_EXPRESSION
    );
    pool_getter!(get_list, lists, ListData, INTERPOLATED_STRING, ARRAY_LITERAL);

    /// Text of an identifier node, empty for anything else.
    pub fn identifier_text(&self, index: NodeIndex) -> &str {
        self.get(index)
            .and_then(|node| self.get_identifier(node))
            .map(|data| {
                if data.atom.is_none() {
                    data.escaped_text.as_str()
                } else {
                    self.interner.resolve(data.atom)
                }
            })
            .unwrap_or("")
    }

    /// Top-level statements of a source file node.
    pub fn statements(&self, source_file: NodeIndex) -> &[NodeIndex] {
        self.get(source_file)
            .and_then(|node| self.get_source_file(node))
            .map(|data| data.statements.nodes.as_slice())
            .unwrap_or(&[])
    }

    /// Children of a node in source order. Absent optional children are skipped.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out: SmallVec<[NodeIndex; 4]> = SmallVec::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        match node.kind {
            SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    push_list(&mut out, &data.statements);
                }
            }
            FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION | ARROW_FUNCTION => {
                if let Some(data) = self.get_function(node) {
                    push_list(&mut out, &data.annotations);
                    push(&mut out, data.receiver);
                    push(&mut out, data.name);
                    push_list(&mut out, &data.parameters);
                    push(&mut out, data.return_type);
                    push(&mut out, data.body);
                }
            }
            EXTERN_TYPE_DECLARATION => {
                if let Some(data) = self.get_type_decl(node) {
                    push(&mut out, data.name);
                    push_list(&mut out, &data.type_parameters);
                }
            }
            PARAMETER => {
                if let Some(data) = self.get_parameter(node) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_annotation);
                }
            }
            TYPE_REFERENCE => {
                if let Some(data) = self.get_type_ref(node) {
                    push(&mut out, data.name);
                    push_list(&mut out, &data.type_arguments);
                }
            }
            BLOCK => {
                if let Some(data) = self.get_block(node) {
                    push_list(&mut out, &data.statements);
                }
            }
            VARIABLE_STATEMENT => {
                if let Some(data) = self.get_variable(node) {
                    push(&mut out, data.name);
                    push(&mut out, data.type_annotation);
                    push(&mut out, data.initializer);
                }
            }
            EXPRESSION_STATEMENT | RETURN_STATEMENT | YIELD_STATEMENT | THROW_STATEMENT
            | PARENTHESIZED_EXPRESSION | INTERPOLATION | ANNOTATION => {
                if let Some(data) = self.get_wrapped(node) {
                    push(&mut out, data.expression);
                }
            }
            IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    push(&mut out, data.condition);
                    push(&mut out, data.then_statement);
                    push(&mut out, data.else_statement);
                }
            }
            WHILE_STATEMENT => {
                if let Some(data) = self.get_loop(node) {
                    push(&mut out, data.condition);
                    push(&mut out, data.statement);
                }
            }
            CALL_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    push(&mut out, data.expression);
                    push_list(&mut out, &data.arguments);
                }
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                if let Some(data) = self.get_access_expr(node) {
                    push(&mut out, data.expression);
                    push(&mut out, data.name_or_argument);
                }
            }
            PREFIX_UNARY_EXPRESSION | AWAIT_EXPRESSION => {
                if let Some(data) = self.get_unary_expr(node) {
                    push(&mut out, data.operand);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    push(&mut out, data.left);
                    push(&mut out, data.right);
                }
            }
            CONDITIONAL_EXPRESSION => {
                if let Some(data) = self.get_conditional_expr(node) {
                    push(&mut out, data.condition);
                    push(&mut out, data.when_true);
                    push(&mut out, data.when_false);
                }
            }
            INTERPOLATED_STRING | ARRAY_LITERAL => {
                if let Some(data) = self.get_list(node) {
                    push_list(&mut out, &data.elements);
                }
            }
            _ => {}
        }
        out
    }
}

#[inline]
fn push(out: &mut SmallVec<[NodeIndex; 4]>, child: NodeIndex) {
    if child.is_some() {
        out.push(child);
    }
}

#[inline]
fn push_list(out: &mut SmallVec<[NodeIndex; 4]>, list: &NodeList) {
    out.extend(list.iter().filter(|child| child.is_some()));
}

impl Node {
    /// Function-like nodes open a new callable body.
    #[inline]
    pub fn is_function_like(&self) -> bool {
        matches!(
            self.kind,
            FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION | ARROW_FUNCTION
        )
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        self.has_flag(node_flags::ASYNC)
    }
}
