//! Scanner, parser and AST arena for the orphan reference host language.
//!
//! The reference host is a compact C#-flavoured language with `async`/`await`,
//! discard assignment, lambdas, local functions and interpolated strings.
//! It exists so the analysis has one concrete host toolchain to run against:
//! - `scanner` - `SyntaxKind` tokens and the `Scanner` state machine
//! - `parser` - `ParserState` (recursive descent) and the `NodeArena`

pub mod scanner;
pub use scanner::{Scanner, SyntaxKind, Token};

pub mod parser;
pub use parser::{NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState, syntax_kind_ext};

/// Parse `source` and return the arena, the root node and parse diagnostics.
pub fn parse_source(
    file_name: impl Into<String>,
    source: impl Into<String>,
) -> (NodeArena, NodeIndex, Vec<ParseDiagnostic>) {
    let mut parser = ParserState::new(file_name.into(), source.into());
    let root = parser.parse_source_file();
    let diagnostics = std::mem::take(&mut parser.parse_diagnostics);
    (parser.into_arena(), root, diagnostics)
}
