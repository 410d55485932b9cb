//! Parser state - expression parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::{
    AccessExprData, BinaryExprData, CallExprData, ConditionalExprData, FunctionData, ListData,
    LiteralData, UnaryExprData, WrappedData, node_flags,
};
use super::state::ParserState;
use super::syntax_kind_ext;
use crate::scanner::SyntaxKind;

/// Binary operator precedence; 0 means "not a binary operator".
fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => 4,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken => 5,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 6,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 7,
        _ => 0,
    }
}

impl ParserState {
    pub(crate) fn can_start_expression(&self) -> bool {
        matches!(
            self.kind(),
            SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::InterpolatedStringStart
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::MinusToken
                | SyntaxKind::AwaitKeyword
                | SyntaxKind::AsyncKeyword
        )
    }

    pub fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            let pos = self.token_pos();
            return self.arena.add_missing_expression(pos);
        }
        let expression = self.parse_assignment_expression();
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression(&mut self) -> NodeIndex {
        if self.is_start_of_lambda() {
            return self.parse_lambda();
        }
        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        let operator = self.kind();
        if operator.is_assignment_operator() {
            self.next_token();
            let right = self.parse_expression();
            return self.arena.add_binary(
                start,
                self.last_end(),
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
        left
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(1);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_expression();
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_expression();
        self.arena.add_conditional(
            start,
            self.last_end(),
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.kind();
            let precedence = binary_precedence(operator);
            if precedence == 0 || precedence < min_precedence {
                return left;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            left = self.arena.add_binary(
                start,
                self.last_end(),
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operator = self.kind();
        let kind = match operator {
            SyntaxKind::AwaitKeyword => syntax_kind_ext::AWAIT_EXPRESSION,
            SyntaxKind::ExclamationToken | SyntaxKind::MinusToken => {
                syntax_kind_ext::PREFIX_UNARY_EXPRESSION
            }
            _ => return self.parse_postfix_expression(),
        };
        self.next_token();
        if !self.enter_recursion() {
            return self.arena.add_missing_expression(start);
        }
        let operand = self.parse_unary_expression();
        self.exit_recursion();
        self.arena.add_unary(
            kind,
            start,
            self.last_end(),
            UnaryExprData {
                operator: operator as u16,
                operand,
            },
        )
    }

    /// Member access, element access and invocation chains.
    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_primary_expression();
        loop {
            match self.kind() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier();
                    expression = self.arena.add_access(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start,
                        self.last_end(),
                        AccessExprData {
                            expression,
                            name_or_argument: name,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.parse_expression();
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    expression = self.arena.add_access(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start,
                        self.last_end(),
                        AccessExprData {
                            expression,
                            name_or_argument: argument,
                        },
                    );
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    expression = self.arena.add_call(
                        start,
                        self.last_end(),
                        CallExprData {
                            expression,
                            arguments,
                        },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_argument_list(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is(SyntaxKind::CloseParenToken) && !self.is(SyntaxKind::EndOfFileToken) {
            arguments.push(self.parse_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from(arguments)
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let token = self.token();
        match token.kind {
            SyntaxKind::Identifier => {
                self.next_token();
                self.create_identifier(token)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => {
                self.next_token();
                let text = self.token_text(token).to_string();
                self.arena.add_literal(
                    token.kind as u16,
                    token.span.start,
                    token.span.end,
                    LiteralData { text },
                )
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword | SyntaxKind::NullKeyword => {
                self.next_token();
                self.arena
                    .add_token(token.kind as u16, token.span.start, token.span.end)
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapped(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    token.span.start,
                    self.last_end(),
                    WrappedData { expression },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::InterpolatedStringStart => self.parse_interpolated_string(),
            _ => {
                self.error_at(token.span, "Expression expected.");
                self.arena.add_missing_expression(token.span.start)
            }
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is(SyntaxKind::CloseBracketToken) && !self.is(SyntaxKind::EndOfFileToken) {
            elements.push(self.parse_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_list(
            syntax_kind_ext::ARRAY_LITERAL,
            start,
            self.last_end(),
            ListData {
                elements: NodeList::from(elements),
            },
        )
    }

    /// `$"text {expr} text"` - parts are text literals and INTERPOLATION holes.
    fn parse_interpolated_string(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::InterpolatedStringStart);
        let mut parts = Vec::new();
        loop {
            let token = self.token();
            match token.kind {
                SyntaxKind::InterpolatedText => {
                    self.next_token();
                    let text = self.token_text(token).to_string();
                    parts.push(self.arena.add_literal(
                        token.kind as u16,
                        token.span.start,
                        token.span.end,
                        LiteralData { text },
                    ));
                }
                SyntaxKind::OpenBraceToken => {
                    self.next_token();
                    let expression = self.parse_expression();
                    self.parse_expected(SyntaxKind::CloseBraceToken);
                    parts.push(self.arena.add_wrapped(
                        syntax_kind_ext::INTERPOLATION,
                        token.span.start,
                        self.last_end(),
                        WrappedData { expression },
                    ));
                }
                SyntaxKind::InterpolatedStringEnd => {
                    self.next_token();
                    break;
                }
                // Unterminated; the scanner already reported it.
                _ => break,
            }
        }
        self.arena.add_list(
            syntax_kind_ext::INTERPOLATED_STRING,
            start,
            self.last_end(),
            ListData {
                elements: NodeList::from(parts),
            },
        )
    }

    // =========================================================================
    // Lambdas
    // =========================================================================

    fn is_start_of_lambda(&self) -> bool {
        let offset = usize::from(self.is(SyntaxKind::AsyncKeyword));
        match self.peek_token(offset).kind {
            SyntaxKind::Identifier => {
                self.peek_token(offset + 1).kind == SyntaxKind::EqualsGreaterThanToken
            }
            SyntaxKind::OpenParenToken => {
                let mut depth = 0usize;
                let mut index = offset;
                loop {
                    match self.peek_token(index).kind {
                        SyntaxKind::OpenParenToken => depth += 1,
                        SyntaxKind::CloseParenToken => {
                            depth -= 1;
                            if depth == 0 {
                                return self.peek_token(index + 1).kind
                                    == SyntaxKind::EqualsGreaterThanToken;
                            }
                        }
                        SyntaxKind::EndOfFileToken => return false,
                        _ => {}
                    }
                    index += 1;
                }
            }
            _ => false,
        }
    }

    /// `async? (params) => body` or `async? x => body`
    fn parse_lambda(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let flags = if self.parse_optional(SyntaxKind::AsyncKeyword) {
            node_flags::ASYNC
        } else {
            0
        };
        let parameters = if self.is(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list()
        } else {
            NodeList::from(vec![self.parse_parameter()])
        };
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.is(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_expression()
        };
        self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            start,
            self.last_end(),
            flags,
            FunctionData {
                name: NodeIndex::NONE,
                receiver: NodeIndex::NONE,
                parameters,
                return_type: NodeIndex::NONE,
                body,
                annotations: NodeList::new(),
            },
        )
    }
}
