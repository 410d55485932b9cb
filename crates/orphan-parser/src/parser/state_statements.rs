//! Parser state - statement and declaration parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::{
    BlockData, FunctionData, IfStatementData, LoopData, ParameterData, SourceFileData,
    TypeDeclData, TypeRefData, VariableData, WrappedData, node_flags,
};
use super::state::ParserState;
use super::syntax_kind_ext;
use crate::scanner::SyntaxKind;
use orphan_common::Span;
use tracing::trace;

impl ParserState {
    /// Parse a whole source file and return its root node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.is(SyntaxKind::EndOfFileToken) {
            let before = self.cursor;
            let statement = self.parse_statement(true);
            if statement.is_some() {
                statements.push(statement);
            }
            if self.cursor == before {
                // Stray token (typically `}`) that no rule consumes.
                let token = self.token();
                self.error_at(token.span, "Declaration or statement expected.");
                self.next_token();
            }
        }

        let end = self.source.len() as u32;
        let interner = std::mem::take(&mut self.interner);
        self.arena.set_interner(interner);
        let root = self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                statements: NodeList::from(statements),
                file_name: self.file_name.clone(),
                text: std::sync::Arc::clone(&self.source),
            },
        );
        self.arena.link_parents(root);
        trace!(file = %self.file_name, nodes = self.arena.len(), "parsed source file");
        root
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self, top_level: bool) -> NodeIndex {
        if !self.enter_recursion() {
            self.skip_to_statement_boundary();
            return NodeIndex::NONE;
        }
        let statement = match self.kind() {
            SyntaxKind::AtToken | SyntaxKind::FnKeyword => self.parse_function_declaration(),
            SyntaxKind::AsyncKeyword if self.peek_token(1).kind == SyntaxKind::FnKeyword => {
                self.parse_function_declaration()
            }
            SyntaxKind::ExternKeyword => {
                if !top_level {
                    let token = self.token();
                    self.error_at(token.span, "'extern' declarations are only allowed at top level.");
                }
                self.parse_extern_declaration()
            }
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::VarKeyword => self.parse_variable_statement(),
            SyntaxKind::ReturnKeyword => self.parse_wrapped_statement(syntax_kind_ext::RETURN_STATEMENT),
            SyntaxKind::YieldKeyword => self.parse_wrapped_statement(syntax_kind_ext::YIELD_STATEMENT),
            SyntaxKind::ThrowKeyword => self.parse_wrapped_statement(syntax_kind_ext::THROW_STATEMENT),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::SemicolonToken => {
                let token = self.token();
                self.next_token();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, token.span.start, token.span.end)
            }
            SyntaxKind::CloseBraceToken if top_level => NodeIndex::NONE,
            _ => self.parse_expression_statement(),
        };
        self.exit_recursion();
        statement
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut statements = Vec::new();
        while !self.is(SyntaxKind::CloseBraceToken) && !self.is(SyntaxKind::EndOfFileToken) {
            let before = self.cursor;
            let statement = self.parse_statement(false);
            if statement.is_some() {
                statements.push(statement);
            }
            if self.cursor == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            start,
            self.last_end(),
            BlockData {
                statements: NodeList::from(statements),
            },
        )
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::VarKeyword);
        let name = self.parse_identifier();
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_reference()
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_expression()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena.add_variable(
            start,
            self.last_end(),
            VariableData {
                name,
                type_annotation,
                initializer,
            },
        )
    }

    /// `return expr?;`, `yield return? expr;`, `throw expr;`
    fn parse_wrapped_statement(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if kind == syntax_kind_ext::YIELD_STATEMENT {
            self.parse_optional(SyntaxKind::ReturnKeyword);
        }
        let expression = if self.is(SyntaxKind::SemicolonToken) && kind == syntax_kind_ext::RETURN_STATEMENT {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena
            .add_wrapped(kind, start, self.last_end(), WrappedData { expression })
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement(false);
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement(false)
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            start,
            self.last_end(),
            IfStatementData {
                condition,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement(false);
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start,
            self.last_end(),
            LoopData {
                condition,
                statement,
            },
        )
    }

    /// `expr;` - a statement that lacks a parseable expression keeps a NONE
    /// expression so later passes can see (and skip) the malformed fragment.
    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = if self.can_start_expression() {
            self.parse_expression()
        } else {
            let token = self.token();
            self.error_at(token.span, "Expression expected.");
            self.skip_to_statement_boundary();
            NodeIndex::NONE
        };
        if expression.is_some() {
            self.parse_semicolon();
        }
        self.arena.add_wrapped(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start,
            self.last_end().max(start),
            WrappedData { expression },
        )
    }

    fn parse_semicolon(&mut self) {
        if !self.parse_expected(SyntaxKind::SemicolonToken) {
            self.skip_to_statement_boundary();
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_annotations(&mut self) -> Vec<NodeIndex> {
        let mut annotations = Vec::new();
        while self.is(SyntaxKind::AtToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_identifier();
            annotations.push(self.arena.add_wrapped(
                syntax_kind_ext::ANNOTATION,
                start,
                self.last_end(),
                WrappedData { expression },
            ));
        }
        annotations
    }

    /// `@annotation* async? fn name(params): Type { body }`
    fn parse_function_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let annotations = self.parse_annotations();
        let flags = if self.parse_optional(SyntaxKind::AsyncKeyword) {
            node_flags::ASYNC
        } else {
            0
        };
        self.parse_expected(SyntaxKind::FnKeyword);
        let name = self.parse_identifier();
        let parameters = self.parse_parameter_list();
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_reference()
        } else {
            NodeIndex::NONE
        };
        let body = self.parse_block();
        self.arena.add_function(
            syntax_kind_ext::FUNCTION_DECLARATION,
            start,
            self.last_end(),
            flags,
            FunctionData {
                name,
                receiver: NodeIndex::NONE,
                parameters,
                return_type,
                body,
                annotations: NodeList::from(annotations),
            },
        )
    }

    /// `extern type Name<T>;` or `extern fn Receiver<T>.name(params): Type;`
    fn parse_extern_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ExternKeyword);

        if self.parse_optional(SyntaxKind::TypeKeyword) {
            let name = self.parse_identifier();
            let mut type_parameters = Vec::new();
            if self.parse_optional(SyntaxKind::LessThanToken) {
                loop {
                    type_parameters.push(self.parse_identifier());
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                self.parse_expected(SyntaxKind::GreaterThanToken);
            }
            self.parse_semicolon();
            return self.arena.add_type_decl(
                start,
                self.last_end(),
                TypeDeclData {
                    name,
                    type_parameters: NodeList::from(type_parameters),
                },
            );
        }

        self.parse_expected(SyntaxKind::FnKeyword);
        let has_receiver = matches!(
            self.peek_token(1).kind,
            SyntaxKind::DotToken | SyntaxKind::LessThanToken
        );
        let receiver = if has_receiver {
            let receiver = self.parse_type_reference();
            self.parse_expected(SyntaxKind::DotToken);
            receiver
        } else {
            NodeIndex::NONE
        };
        let name = self.parse_identifier();
        let parameters = self.parse_parameter_list();
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_reference()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena.add_function(
            syntax_kind_ext::EXTERN_FUNCTION_DECLARATION,
            start,
            self.last_end(),
            0,
            FunctionData {
                name,
                receiver,
                parameters,
                return_type,
                body: NodeIndex::NONE,
                annotations: NodeList::new(),
            },
        )
    }

    /// `( name: Type, name )`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is(SyntaxKind::CloseParenToken) && !self.is(SyntaxKind::EndOfFileToken) {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from(parameters)
    }

    pub(crate) fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_identifier();
        let type_annotation = if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_reference()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_parameter(
            start,
            self.last_end().max(start),
            ParameterData {
                name,
                type_annotation,
            },
        )
    }

    /// `Name` or `Name<Arg, ...>`
    pub(crate) fn parse_type_reference(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let name = self.parse_identifier();
        let mut type_arguments = Vec::new();
        if name.is_some() && self.parse_optional(SyntaxKind::LessThanToken) {
            loop {
                type_arguments.push(self.parse_type_reference());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::GreaterThanToken);
        }
        self.exit_recursion();
        if name.is_none() {
            return NodeIndex::NONE;
        }
        let span = Span::new(start, self.last_end());
        self.arena.add_type_ref(
            span.start,
            span.end,
            TypeRefData {
                name,
                type_arguments: NodeList::from(type_arguments),
            },
        )
    }
}
