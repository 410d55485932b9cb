//! Scanner/tokenizer for the reference host language.
//!
//! The scanner produces the whole token stream up front. Interpolated strings
//! are handled with a mode stack: `$"` enters string mode, `{` inside the
//! string opens a code hole (tracked by brace depth), and the matching `}`
//! returns to string mode.

use orphan_common::Span;
use serde::Serialize;

/// Token kinds. Node kinds live in `syntax_kind_ext` above `FIRST_NODE`.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,
    Identifier,
    NumericLiteral,
    StringLiteral,
    // Interpolated strings: `$"` text* ({ expr })* `"`
    InterpolatedStringStart,
    InterpolatedText,
    InterpolatedStringEnd,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    QuestionToken,
    AtToken,
    EqualsGreaterThanToken,
    // Operators
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    ExclamationToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionQuestionToken,
    // Keywords
    AsyncKeyword,
    AwaitKeyword,
    ElseKeyword,
    ExternKeyword,
    FalseKeyword,
    FnKeyword,
    IfKeyword,
    NullKeyword,
    ReturnKeyword,
    ThrowKeyword,
    TrueKeyword,
    TypeKeyword,
    VarKeyword,
    WhileKeyword,
    YieldKeyword,
}

impl SyntaxKind {
    /// Every token kind, indexed by discriminant.
    const ALL: [SyntaxKind; 56] = [
        SyntaxKind::Unknown,
        SyntaxKind::EndOfFileToken,
        SyntaxKind::Identifier,
        SyntaxKind::NumericLiteral,
        SyntaxKind::StringLiteral,
        SyntaxKind::InterpolatedStringStart,
        SyntaxKind::InterpolatedText,
        SyntaxKind::InterpolatedStringEnd,
        SyntaxKind::OpenBraceToken,
        SyntaxKind::CloseBraceToken,
        SyntaxKind::OpenParenToken,
        SyntaxKind::CloseParenToken,
        SyntaxKind::OpenBracketToken,
        SyntaxKind::CloseBracketToken,
        SyntaxKind::DotToken,
        SyntaxKind::CommaToken,
        SyntaxKind::SemicolonToken,
        SyntaxKind::ColonToken,
        SyntaxKind::QuestionToken,
        SyntaxKind::AtToken,
        SyntaxKind::EqualsGreaterThanToken,
        SyntaxKind::EqualsToken,
        SyntaxKind::PlusEqualsToken,
        SyntaxKind::MinusEqualsToken,
        SyntaxKind::AsteriskEqualsToken,
        SyntaxKind::SlashEqualsToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::ExclamationEqualsToken,
        SyntaxKind::LessThanToken,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::LessThanEqualsToken,
        SyntaxKind::GreaterThanEqualsToken,
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SlashToken,
        SyntaxKind::PercentToken,
        SyntaxKind::ExclamationToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::BarBarToken,
        SyntaxKind::QuestionQuestionToken,
        SyntaxKind::AsyncKeyword,
        SyntaxKind::AwaitKeyword,
        SyntaxKind::ElseKeyword,
        SyntaxKind::ExternKeyword,
        SyntaxKind::FalseKeyword,
        SyntaxKind::FnKeyword,
        SyntaxKind::IfKeyword,
        SyntaxKind::NullKeyword,
        SyntaxKind::ReturnKeyword,
        SyntaxKind::ThrowKeyword,
        SyntaxKind::TrueKeyword,
        SyntaxKind::TypeKeyword,
        SyntaxKind::VarKeyword,
        SyntaxKind::WhileKeyword,
        SyntaxKind::YieldKeyword,
    ];

    /// Token kind for a raw `u16`; `None` for node kinds and out-of-range values.
    pub fn try_from_u16(value: u16) -> Option<SyntaxKind> {
        SyntaxKind::ALL.get(value as usize).copied()
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "async" => SyntaxKind::AsyncKeyword,
            "await" => SyntaxKind::AwaitKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "extern" => SyntaxKind::ExternKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "fn" => SyntaxKind::FnKeyword,
            "if" => SyntaxKind::IfKeyword,
            "null" => SyntaxKind::NullKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "throw" => SyntaxKind::ThrowKeyword,
            "true" => SyntaxKind::TrueKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "var" => SyntaxKind::VarKeyword,
            "while" => SyntaxKind::WhileKeyword,
            "yield" => SyntaxKind::YieldKeyword,
            _ => return None,
        })
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
        )
    }

    /// Operators whose result is `bool` regardless of operand types.
    pub fn is_boolean_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::LessThanEqualsToken
                | SyntaxKind::GreaterThanEqualsToken
                | SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::ExclamationToken
        )
    }

    pub fn text(self) -> &'static str {
        match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::AtToken => "@",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::EndOfFileToken => "end of file",
            _ => "token",
        }
    }
}

/// A scanned token: kind plus byte range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

/// A lexical error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub span: Span,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Code inside an interpolation hole; the hole closes at depth 0.
    Hole { brace_depth: u32 },
    /// Text inside `$"..."`.
    Interpolated,
}

pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    modes: Vec<Mode>,
    tokens: Vec<Token>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            modes: Vec::new(),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan the whole source. The token list always ends with `EndOfFileToken`.
    pub fn scan_all(mut self) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
        loop {
            let done = match self.modes.last() {
                Some(Mode::Interpolated) => self.scan_interpolated_part(),
                _ => self.scan_code_token(),
            };
            if done {
                break;
            }
        }
        (self.tokens, self.diagnostics)
    }

    fn push(&mut self, kind: SyntaxKind, start: usize) {
        self.tokens.push(Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
        });
    }

    fn error(&mut self, start: usize, end: usize, message: impl Into<String>) {
        self.diagnostics.push(ScannerDiagnostic {
            span: Span::new(start as u32, end as u32),
            message: message.into(),
        });
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => {
                                self.error(start, self.pos, "Unterminated block comment.");
                                break;
                            }
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan one token in code mode. Returns true once end of file is emitted.
    fn scan_code_token(&mut self) -> bool {
        self.skip_trivia();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            if !self.modes.is_empty() {
                self.error(start, start, "Unterminated interpolated string.");
                self.modes.clear();
            }
            self.push(SyntaxKind::EndOfFileToken, start);
            return true;
        };

        let kind = match ch {
            b'{' => {
                self.pos += 1;
                if let Some(Mode::Hole { brace_depth }) = self.modes.last_mut() {
                    *brace_depth += 1;
                }
                SyntaxKind::OpenBraceToken
            }
            b'}' => {
                self.pos += 1;
                match self.modes.last_mut() {
                    Some(Mode::Hole { brace_depth: 0 }) => {
                        self.modes.pop();
                    }
                    Some(Mode::Hole { brace_depth }) => *brace_depth -= 1,
                    _ => {}
                }
                SyntaxKind::CloseBraceToken
            }
            b'$' if self.peek_at(1) == Some(b'"') => {
                self.pos += 2;
                self.modes.push(Mode::Interpolated);
                SyntaxKind::InterpolatedStringStart
            }
            b'"' => self.scan_string(start),
            b'0'..=b'9' => {
                while matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'_')) {
                    self.pos += 1;
                }
                SyntaxKind::NumericLiteral
            }
            c if c == b'_' || c.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(c) if c == b'_' || c.is_ascii_alphanumeric()) {
                    self.pos += 1;
                }
                SyntaxKind::from_keyword(&self.source[start..self.pos])
                    .unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.scan_punctuation(start, ch),
        };
        self.push(kind, start);
        false
    }

    fn scan_string(&mut self, start: usize) -> SyntaxKind {
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    self.error(start, self.pos, "Unterminated string literal.");
                    break;
                }
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        SyntaxKind::StringLiteral
    }

    fn scan_punctuation(&mut self, start: usize, ch: u8) -> SyntaxKind {
        let next = self.peek_at(1);
        let (kind, width) = match (ch, next) {
            (b'=', Some(b'>')) => (SyntaxKind::EqualsGreaterThanToken, 2),
            (b'=', Some(b'=')) => (SyntaxKind::EqualsEqualsToken, 2),
            (b'!', Some(b'=')) => (SyntaxKind::ExclamationEqualsToken, 2),
            (b'<', Some(b'=')) => (SyntaxKind::LessThanEqualsToken, 2),
            (b'>', Some(b'=')) => (SyntaxKind::GreaterThanEqualsToken, 2),
            (b'+', Some(b'=')) => (SyntaxKind::PlusEqualsToken, 2),
            (b'-', Some(b'=')) => (SyntaxKind::MinusEqualsToken, 2),
            (b'*', Some(b'=')) => (SyntaxKind::AsteriskEqualsToken, 2),
            (b'/', Some(b'=')) => (SyntaxKind::SlashEqualsToken, 2),
            (b'&', Some(b'&')) => (SyntaxKind::AmpersandAmpersandToken, 2),
            (b'|', Some(b'|')) => (SyntaxKind::BarBarToken, 2),
            (b'?', Some(b'?')) => (SyntaxKind::QuestionQuestionToken, 2),
            (b'(', _) => (SyntaxKind::OpenParenToken, 1),
            (b')', _) => (SyntaxKind::CloseParenToken, 1),
            (b'[', _) => (SyntaxKind::OpenBracketToken, 1),
            (b']', _) => (SyntaxKind::CloseBracketToken, 1),
            (b'.', _) => (SyntaxKind::DotToken, 1),
            (b',', _) => (SyntaxKind::CommaToken, 1),
            (b';', _) => (SyntaxKind::SemicolonToken, 1),
            (b':', _) => (SyntaxKind::ColonToken, 1),
            (b'?', _) => (SyntaxKind::QuestionToken, 1),
            (b'@', _) => (SyntaxKind::AtToken, 1),
            (b'=', _) => (SyntaxKind::EqualsToken, 1),
            (b'<', _) => (SyntaxKind::LessThanToken, 1),
            (b'>', _) => (SyntaxKind::GreaterThanToken, 1),
            (b'+', _) => (SyntaxKind::PlusToken, 1),
            (b'-', _) => (SyntaxKind::MinusToken, 1),
            (b'*', _) => (SyntaxKind::AsteriskToken, 1),
            (b'/', _) => (SyntaxKind::SlashToken, 1),
            (b'%', _) => (SyntaxKind::PercentToken, 1),
            (b'!', _) => (SyntaxKind::ExclamationToken, 1),
            _ => {
                // Skip the whole UTF-8 character so spans stay on char boundaries.
                let width = self
                    .source
                    .get(start..)
                    .and_then(|rest| rest.chars().next())
                    .map(char::len_utf8)
                    .unwrap_or(1);
                self.error(start, start + width, "Invalid character.");
                (SyntaxKind::Unknown, width)
            }
        };
        self.pos += width;
        kind
    }

    /// Scan one piece of interpolated-string text. Never emits end of file;
    /// an unterminated string drops back to code mode, which reports it.
    fn scan_interpolated_part(&mut self) -> bool {
        let start = self.pos;
        match self.peek() {
            None => {
                self.error(start, start, "Unterminated interpolated string.");
                self.modes.pop();
                return false;
            }
            Some(b'"') => {
                self.pos += 1;
                self.modes.pop();
                self.push(SyntaxKind::InterpolatedStringEnd, start);
                return false;
            }
            Some(b'{') if self.peek_at(1) != Some(b'{') => {
                self.pos += 1;
                self.modes.push(Mode::Hole { brace_depth: 0 });
                self.push(SyntaxKind::OpenBraceToken, start);
                return false;
            }
            _ => {}
        }

        while let Some(ch) = self.peek() {
            match ch {
                b'{' | b'}' if self.peek_at(1) == Some(ch) => self.pos += 2,
                b'{' | b'"' => break,
                b'\\' => self.pos += 2,
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        self.push(SyntaxKind::InterpolatedText, start);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let (tokens, diags) = Scanner::new(source).scan_all();
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_kind_table_matches_discriminants() {
        for (index, kind) in SyntaxKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, index);
        }
        assert_eq!(
            SyntaxKind::try_from_u16(SyntaxKind::QuestionQuestionToken as u16),
            Some(SyntaxKind::QuestionQuestionToken)
        );
        assert_eq!(SyntaxKind::try_from_u16(crate::syntax_kind_ext::CALL_EXPRESSION), None);
    }

    #[test]
    fn test_keywords_and_punctuation() {
        assert_eq!(
            kinds("_ = await f();"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::EqualsToken,
                SyntaxKind::AwaitKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_interpolated_string_with_nested_braces() {
        assert_eq!(
            kinds("$\"a {f(() => { })} b\""),
            vec![
                SyntaxKind::InterpolatedStringStart,
                SyntaxKind::InterpolatedText,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::InterpolatedText,
                SyntaxKind::InterpolatedStringEnd,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_escaped_braces_stay_text() {
        assert_eq!(
            kinds("$\"{{x}}\""),
            vec![
                SyntaxKind::InterpolatedStringStart,
                SyntaxKind::InterpolatedText,
                SyntaxKind::InterpolatedStringEnd,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports() {
        let (tokens, diags) = Scanner::new("\"abc").scan_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::EndOfFileToken));
    }

    #[test]
    fn test_comments_are_trivia() {
        assert_eq!(
            kinds("// line\n/* block */ x"),
            vec![SyntaxKind::Identifier, SyntaxKind::EndOfFileToken]
        );
    }
}
