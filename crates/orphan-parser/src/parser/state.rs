//! Parser state: token cursor, diagnostics, error recovery.

use super::base::NodeIndex;
use super::node::{IdentifierData, NodeArena};
use crate::scanner::{Scanner, SyntaxKind, Token};
use orphan_common::limits::MAX_PARSER_RECURSION_DEPTH;
use orphan_common::{Interner, Span};
use std::sync::Arc;
use tracing::debug;

/// A syntax error. Parsing continues after reporting one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: Arc<str>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) cursor: usize,
    pub(crate) arena: NodeArena,
    pub(crate) interner: Interner,
    pub(crate) recursion_depth: u32,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let source: Arc<str> = Arc::from(source_text);
        let (tokens, scanner_diagnostics) = Scanner::new(&source).scan_all();
        let parse_diagnostics = scanner_diagnostics
            .into_iter()
            .map(|diag| ParseDiagnostic {
                start: diag.span.start,
                length: diag.span.len(),
                message: diag.message,
            })
            .collect();
        let mut interner = Interner::new();
        interner.intern_common();
        let estimated_nodes = tokens.len() * 2;

        ParserState {
            file_name,
            arena: NodeArena::with_text(Arc::clone(&source), estimated_nodes),
            source,
            tokens,
            cursor: 0,
            interner,
            recursion_depth: 0,
            parse_diagnostics,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.peek_token(0)
    }

    /// Token `offset` positions ahead; end of file once past the stream.
    #[inline]
    pub(crate) fn peek_token(&self, offset: usize) -> Token {
        self.tokens
            .get(self.cursor + offset)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or(Token {
                kind: SyntaxKind::EndOfFileToken,
                span: Span::at(self.source.len() as u32),
            })
    }

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.token().kind
    }

    #[inline]
    pub(crate) fn is(&self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.token().span.start
    }

    /// End of the most recently consumed token.
    #[inline]
    pub(crate) fn last_end(&self) -> u32 {
        if self.cursor == 0 {
            return 0;
        }
        self.tokens
            .get(self.cursor - 1)
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    pub(crate) fn next_token(&mut self) {
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report it as expected. Never consumes on mismatch.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let token = self.token();
        self.error_at(token.span, format!("'{}' expected.", kind.text()));
        false
    }

    pub(crate) fn token_text(&self, token: Token) -> &str {
        token.span.slice(&self.source)
    }

    // =========================================================================
    // Diagnostics and recovery
    // =========================================================================

    pub(crate) fn error_at(&mut self, span: Span, message: impl Into<String>) {
        // One error per position keeps cascades quiet.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == span.start)
        {
            return;
        }
        let message = message.into();
        debug!(file = %self.file_name, start = span.start, %message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start: span.start,
            length: span.len(),
            message,
        });
    }

    /// Skip tokens until just past a `;`, or up to a `}` / end of file.
    pub(crate) fn skip_to_statement_boundary(&mut self) {
        loop {
            match self.kind() {
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken => return,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    return;
                }
                _ => self.next_token(),
            }
        }
    }

    /// Enter a recursive rule. Returns false (after reporting) when nesting is too deep.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            let token = self.token();
            self.error_at(token.span, "Expression or statement nested too deeply.");
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Leaf nodes
    // =========================================================================

    /// Parse an identifier, or report and return NONE.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        let token = self.token();
        if token.kind != SyntaxKind::Identifier {
            self.error_at(token.span, "Identifier expected.");
            return NodeIndex::NONE;
        }
        self.next_token();
        self.create_identifier(token)
    }

    pub(crate) fn create_identifier(&mut self, token: Token) -> NodeIndex {
        let text = token.span.slice(&self.source).to_string();
        let atom = self.interner.intern(&text);
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            token.span.start,
            token.span.end,
            IdentifierData {
                atom,
                escaped_text: text,
            },
        )
    }
}
