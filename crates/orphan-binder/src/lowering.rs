//! Lowering of type references to interned types.

use crate::declarations::DeclarationTable;
use orphan_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use orphan_solver::{IntrinsicKind, TypeId, TypeInterner};
use smallvec::SmallVec;

pub struct TypeLowering<'a> {
    arena: &'a NodeArena,
    types: &'a TypeInterner,
    table: &'a DeclarationTable,
    /// Names bound to `TypeParameter { index }` by position.
    type_parameters: &'a [String],
}

impl<'a> TypeLowering<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        table: &'a DeclarationTable,
    ) -> Self {
        TypeLowering {
            arena,
            types,
            table,
            type_parameters: &[],
        }
    }

    pub fn with_type_parameters(mut self, type_parameters: &'a [String]) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    /// Lower a TYPE_REFERENCE node.
    ///
    /// Names that resolve to nothing lower to the error type and are pushed
    /// onto `unknown` so the caller can report them.
    pub fn lower(&self, type_ref: NodeIndex, unknown: &mut Vec<NodeIndex>) -> TypeId {
        let Some(node) = self.arena.get(type_ref) else {
            return TypeId::ERROR;
        };
        if node.kind != syntax_kind_ext::TYPE_REFERENCE {
            return TypeId::ERROR;
        }
        let Some(data) = self.arena.get_type_ref(node) else {
            return TypeId::ERROR;
        };
        let name = self.arena.identifier_text(data.name);
        let args: SmallVec<[TypeId; 2]> = data
            .type_arguments
            .iter()
            .map(|arg| self.lower(arg, unknown))
            .collect();

        if args.is_empty() {
            if let Some(index) = self.type_parameters.iter().position(|p| p == name) {
                return self.types.type_parameter(index as u32);
            }
            if let Some(kind) = IntrinsicKind::from_name(name) {
                return kind.type_id();
            }
        }

        match self.table.type_named(name, args.len() as u32) {
            Some(definition) if args.is_empty() => definition,
            Some(definition) => self.types.application(definition, &args),
            None => {
                unknown.push(type_ref);
                TypeId::ERROR
            }
        }
    }

    /// Lower an optional annotation; `fallback` when absent.
    pub fn lower_or(&self, type_ref: NodeIndex, fallback: TypeId, unknown: &mut Vec<NodeIndex>) -> TypeId {
        if type_ref.is_none() {
            fallback
        } else {
            self.lower(type_ref, unknown)
        }
    }
}
