//! Thin node architecture.
//!
//! Each node is a 16-byte header (`Node`) holding kind, flags, position and a
//! data index. Kind-specific payloads live in typed pools on the `NodeArena`,
//! addressed by `data_index`. Parent links are kept in a parallel vector.

use super::base::{NodeIndex, NodeList};
use orphan_common::Interner;
use orphan_common::interner::Atom;
use serde::Serialize;
use std::sync::Arc;

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    /// `SyntaxKind` value for tokens, `syntax_kind_ext` value for nodes
    pub kind: u16,
    /// Packed node flags (`node_flags`)
    pub flags: u16,
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset, exclusive)
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

pub mod node_flags {
    /// Function or lambda declared `async`.
    pub const ASYNC: u16 = 1 << 0;
    /// Node was synthesized during error recovery.
    pub const MISSING: u16 = 1 << 1;
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Data for identifier nodes.
#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub atom: Atom,
    pub escaped_text: String,
}

/// Data for literal nodes (numbers, strings, interpolated text).
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
}

/// Shared by `fn` declarations, `extern fn` declarations and lambdas.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    /// Identifier; NONE for lambdas
    pub name: NodeIndex,
    /// Receiver type for `extern fn Type<T>.name(...)`, NONE otherwise
    pub receiver: NodeIndex,
    pub parameters: NodeList,
    /// TYPE_REFERENCE, NONE when omitted
    pub return_type: NodeIndex,
    /// BLOCK, an expression (lambda expression body), or NONE (extern)
    pub body: NodeIndex,
    /// ANNOTATION nodes (`@test`)
    pub annotations: NodeList,
}

/// `extern type Name<T, U>;`
#[derive(Clone, Debug, Serialize)]
pub struct TypeDeclData {
    pub name: NodeIndex,
    /// Identifier nodes naming the type parameters
    pub type_parameters: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeRefData {
    pub name: NodeIndex,
    pub type_arguments: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// `var name: Type = initializer;`
#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Single-child wrappers: expression statements, return/yield/throw,
/// parenthesized expressions, interpolation holes and annotations.
#[derive(Clone, Debug, Serialize)]
pub struct WrappedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

/// Property access (`a.b`) and element access (`a[b]`).
#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

/// Prefix unary operators and `await`.
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Interpolated string parts and array literal elements.
#[derive(Clone, Debug, Serialize)]
pub struct ListData {
    pub elements: NodeList,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Arena owning every node of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    /// Parent of each node, indexed like `nodes` (NONE for the root)
    pub(crate) parents: Vec<NodeIndex>,
    pub(crate) interner: Interner,
    pub(crate) text: Arc<str>,

    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub source_files: Vec<SourceFileData>,
    pub functions: Vec<FunctionData>,
    pub type_decls: Vec<TypeDeclData>,
    pub parameters: Vec<ParameterData>,
    pub type_refs: Vec<TypeRefData>,
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub wrapped: Vec<WrappedData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub lists: Vec<ListData>,
}
