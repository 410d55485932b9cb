//! Parser and AST arena.

mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::{Node, NodeArena};

mod node_access;
mod node_arena;

pub mod syntax_kind_ext;

mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_statements;
