//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext;
use orphan_common::Interner;
use std::sync::Arc;

#[inline]
fn push_pool<T>(pool: &mut Vec<T>, data: T) -> u32 {
    let index = pool.len() as u32;
    pool.push(data);
    index
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena for `text`, pre-allocating from a token-count estimate.
    pub fn with_text(text: Arc<str>, estimated_nodes: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(estimated_nodes),
            parents: Vec::with_capacity(estimated_nodes),
            text,
            ..NodeArena::default()
        }
    }

    /// Set the interner (called after parsing to transfer ownership from the parser)
    pub fn set_interner(&mut self, interner: Interner) {
        self.interner = interner;
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        self.parents.push(NodeIndex::NONE);
        index
    }

    /// Add a node with no payload (keywords such as `true`, `null`).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, kind: u16, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = push_pool(&mut self.identifiers, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = push_pool(&mut self.literals, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let data_index = push_pool(&mut self.source_files, data);
        self.push_node(Node::with_data(syntax_kind_ext::SOURCE_FILE, pos, end, data_index))
    }

    pub fn add_function(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        flags: u16,
        data: FunctionData,
    ) -> NodeIndex {
        let data_index = push_pool(&mut self.functions, data);
        let mut node = Node::with_data(kind, pos, end, data_index);
        node.flags = flags;
        self.push_node(node)
    }

    pub fn add_type_decl(&mut self, pos: u32, end: u32, data: TypeDeclData) -> NodeIndex {
        let data_index = push_pool(&mut self.type_decls, data);
        self.push_node(Node::with_data(
            syntax_kind_ext::EXTERN_TYPE_DECLARATION,
            pos,
            end,
            data_index,
        ))
    }

    pub fn add_parameter(&mut self, pos: u32, end: u32, data: ParameterData) -> NodeIndex {
        let data_index = push_pool(&mut self.parameters, data);
        self.push_node(Node::with_data(syntax_kind_ext::PARAMETER, pos, end, data_index))
    }

    pub fn add_type_ref(&mut self, pos: u32, end: u32, data: TypeRefData) -> NodeIndex {
        let data_index = push_pool(&mut self.type_refs, data);
        self.push_node(Node::with_data(syntax_kind_ext::TYPE_REFERENCE, pos, end, data_index))
    }

    pub fn add_block(&mut self, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let data_index = push_pool(&mut self.blocks, data);
        self.push_node(Node::with_data(syntax_kind_ext::BLOCK, pos, end, data_index))
    }

    pub fn add_variable(&mut self, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let data_index = push_pool(&mut self.variables, data);
        self.push_node(Node::with_data(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            end,
            data_index,
        ))
    }

    pub fn add_wrapped(&mut self, kind: u16, pos: u32, end: u32, data: WrappedData) -> NodeIndex {
        let data_index = push_pool(&mut self.wrapped, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_if_statement(&mut self, pos: u32, end: u32, data: IfStatementData) -> NodeIndex {
        let data_index = push_pool(&mut self.if_statements, data);
        self.push_node(Node::with_data(syntax_kind_ext::IF_STATEMENT, pos, end, data_index))
    }

    pub fn add_loop(&mut self, kind: u16, pos: u32, end: u32, data: LoopData) -> NodeIndex {
        let data_index = push_pool(&mut self.loops, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_call(&mut self, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let data_index = push_pool(&mut self.call_exprs, data);
        self.push_node(Node::with_data(syntax_kind_ext::CALL_EXPRESSION, pos, end, data_index))
    }

    pub fn add_access(&mut self, kind: u16, pos: u32, end: u32, data: AccessExprData) -> NodeIndex {
        let data_index = push_pool(&mut self.access_exprs, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_unary(&mut self, kind: u16, pos: u32, end: u32, data: UnaryExprData) -> NodeIndex {
        let data_index = push_pool(&mut self.unary_exprs, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binary(&mut self, pos: u32, end: u32, data: BinaryExprData) -> NodeIndex {
        let data_index = push_pool(&mut self.binary_exprs, data);
        self.push_node(Node::with_data(
            syntax_kind_ext::BINARY_EXPRESSION,
            pos,
            end,
            data_index,
        ))
    }

    pub fn add_conditional(&mut self, pos: u32, end: u32, data: ConditionalExprData) -> NodeIndex {
        let data_index = push_pool(&mut self.conditional_exprs, data);
        self.push_node(Node::with_data(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            pos,
            end,
            data_index,
        ))
    }

    pub fn add_list(&mut self, kind: u16, pos: u32, end: u32, data: ListData) -> NodeIndex {
        let data_index = push_pool(&mut self.lists, data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    /// Placeholder for an expression that failed to parse.
    pub fn add_missing_expression(&mut self, pos: u32) -> NodeIndex {
        let mut node = Node::new(syntax_kind_ext::MISSING_EXPRESSION, pos, pos);
        node.flags = node_flags::MISSING;
        self.push_node(node)
    }

    /// Fill in parent links for every node reachable from `root`.
    pub fn link_parents(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        while let Some(parent) = stack.pop() {
            for child in self.children(parent) {
                if let Some(slot) = self.parents.get_mut(child.0 as usize) {
                    *slot = parent;
                }
                stack.push(child);
            }
        }
    }
}
