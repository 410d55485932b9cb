//! Binder state: collects the declarations of one file.

use crate::declarations::{DeclarationTable, Signature};
use crate::lowering::TypeLowering;
use orphan_common::Span;
use orphan_parser::parser::node::FunctionData;
use orphan_parser::syntax_kind_ext::{
    EXTERN_FUNCTION_DECLARATION, EXTERN_TYPE_DECLARATION, FUNCTION_DECLARATION,
};
use orphan_parser::{NodeArena, NodeIndex};
use orphan_solver::{TypeId, TypeInterner};
use std::sync::Arc;
use tracing::{debug, trace};

/// A declaration problem. Binding continues after reporting one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindDiagnostic {
    pub span: Span,
    pub message: String,
}

/// Result of binding one file.
#[derive(Debug)]
pub struct BoundFile {
    pub table: DeclarationTable,
    pub diagnostics: Vec<BindDiagnostic>,
}

pub struct BinderState<'a> {
    arena: &'a NodeArena,
    types: &'a TypeInterner,
    table: DeclarationTable,
    diagnostics: Vec<BindDiagnostic>,
}

impl<'a> BinderState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        types: &'a TypeInterner,
        outer: Option<Arc<DeclarationTable>>,
    ) -> Self {
        BinderState {
            arena,
            types,
            table: DeclarationTable::new(outer),
            diagnostics: Vec::new(),
        }
    }

    /// Bind every declaration reachable from `root`.
    ///
    /// Types are declared first so signatures may mention types declared
    /// later in the file. Functions are collected from the whole file, local
    /// functions included.
    pub fn bind_source_file(mut self, root: NodeIndex) -> BoundFile {
        let arena = self.arena;
        for &statement in arena.statements(root) {
            if arena.get(statement).is_some_and(|n| n.kind == EXTERN_TYPE_DECLARATION) {
                self.bind_type_declaration(statement);
            }
        }

        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            match arena.get(index).map(|n| n.kind) {
                Some(FUNCTION_DECLARATION | EXTERN_FUNCTION_DECLARATION) => {
                    self.bind_function(index);
                }
                None => continue,
                _ => {}
            }
            // Reverse so the stack pops children in source order.
            stack.extend(arena.children(index).into_iter().rev());
        }

        debug!(
            types = self.table.type_count(),
            functions = self.table.function_count(),
            methods = self.table.method_count(),
            diagnostics = self.diagnostics.len(),
            "bound source file"
        );
        BoundFile {
            table: self.table,
            diagnostics: self.diagnostics,
        }
    }

    fn error(&mut self, node: NodeIndex, message: String) {
        let span = self.arena.span(node).unwrap_or(Span::DUMMY);
        trace!(%span, %message, "bind error");
        self.diagnostics.push(BindDiagnostic { span, message });
    }

    fn bind_type_declaration(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(data) = arena.get(index).and_then(|n| arena.get_type_decl(n)) else {
            return;
        };
        let name = arena.identifier_text(data.name);
        if name.is_empty() {
            return;
        }
        let arity = data.type_parameters.len() as u32;
        let definition = self.types.definition(name, arity);
        if !self.table.declare_type(name, arity, definition) {
            self.error(index, format!("Duplicate type '{name}' with {arity} type parameter(s)."));
        }
    }

    fn bind_function(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(index) else {
            return;
        };
        let Some(data) = arena.get_function(node) else {
            return;
        };
        let name = arena.identifier_text(data.name);
        if name.is_empty() {
            return;
        }

        if data.receiver.is_some() {
            self.bind_method(index, name, data, node.is_async());
            return;
        }

        let signature = self.lower_signature(name, data, node.is_async(), &[]);
        if !self.table.declare_function(signature) {
            self.error(index, format!("Duplicate function '{name}'."));
        }
    }

    /// `extern fn Receiver<T>.name(...)`: receiver arguments name the type
    /// parameters by position.
    fn bind_method(&mut self, index: NodeIndex, name: &str, data: &FunctionData, is_async: bool) {
        let arena = self.arena;
        let Some(receiver) = arena.get(data.receiver).and_then(|n| arena.get_type_ref(n)) else {
            return;
        };
        let receiver_name = arena.identifier_text(receiver.name);
        let type_parameters: Vec<String> = receiver
            .type_arguments
            .iter()
            .map(|arg| {
                arena
                    .get(arg)
                    .and_then(|n| arena.get_type_ref(n))
                    .map(|r| arena.identifier_text(r.name).to_string())
                    .unwrap_or_default()
            })
            .collect();
        let arity = type_parameters.len() as u32;

        let Some(definition) = self.table.type_named(receiver_name, arity) else {
            self.error(
                data.receiver,
                format!("Cannot find receiver type '{receiver_name}' with {arity} type parameter(s)."),
            );
            return;
        };
        let signature = self.lower_signature(name, data, is_async, &type_parameters);
        if !self.table.declare_method(definition, signature) {
            self.error(index, format!("Duplicate method '{receiver_name}.{name}'."));
        }
    }

    fn lower_signature(
        &mut self,
        name: &str,
        data: &FunctionData,
        is_async: bool,
        type_parameters: &[String],
    ) -> Signature {
        let arena = self.arena;
        let mut unknown = Vec::new();
        let lowering =
            TypeLowering::new(arena, self.types, &self.table).with_type_parameters(type_parameters);

        let parameters = data
            .parameters
            .iter()
            .map(|parameter| {
                arena
                    .get(parameter)
                    .and_then(|n| arena.get_parameter(n))
                    .map(|p| lowering.lower_or(p.type_annotation, TypeId::ERROR, &mut unknown))
                    .unwrap_or(TypeId::ERROR)
            })
            .collect();
        let return_type = lowering.lower_or(data.return_type, TypeId::VOID, &mut unknown);

        for type_ref in unknown {
            let text = arena.node_text(type_ref).to_string();
            self.error(type_ref, format!("Cannot find type '{text}'."));
        }

        Signature {
            name: Arc::from(name),
            parameters,
            return_type,
            is_async,
        }
    }
}
