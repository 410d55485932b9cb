//! Declaration tables.
//!
//! A table maps names to interned types and signatures. Tables nest: a file
//! table's `outer` is the prelude, and lookups fall through to it.

use orphan_solver::TypeId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// Lowered signature of a function or receiver method.
///
/// Types in a receiver method signature may contain `TypeParameter`s that
/// refer to the receiver's type arguments by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub name: Arc<str>,
    pub parameters: Vec<TypeId>,
    /// `void` when the declaration omits it.
    pub return_type: TypeId,
    pub is_async: bool,
}

#[derive(Debug, Default)]
pub struct DeclarationTable {
    outer: Option<Arc<DeclarationTable>>,
    /// name -> (arity, definition)
    types: FxHashMap<Arc<str>, SmallVec<[(u32, TypeId); 2]>>,
    functions: FxHashMap<Arc<str>, Signature>,
    /// definition -> method name -> signature
    methods: FxHashMap<TypeId, FxHashMap<Arc<str>, Signature>>,
}

impl DeclarationTable {
    pub fn new(outer: Option<Arc<DeclarationTable>>) -> DeclarationTable {
        DeclarationTable {
            outer,
            ..DeclarationTable::default()
        }
    }

    pub fn outer(&self) -> Option<&DeclarationTable> {
        self.outer.as_deref()
    }

    /// Declare a type. Returns false if this table already declares it.
    pub fn declare_type(&mut self, name: &str, arity: u32, definition: TypeId) -> bool {
        let entries = self.types.entry(Arc::from(name)).or_default();
        if entries.iter().any(|&(existing, _)| existing == arity) {
            return false;
        }
        entries.push((arity, definition));
        true
    }

    /// Declare a free function. Returns false on a duplicate name.
    pub fn declare_function(&mut self, signature: Signature) -> bool {
        if self.functions.contains_key(&signature.name) {
            return false;
        }
        self.functions.insert(Arc::clone(&signature.name), signature);
        true
    }

    /// Declare a method on a receiver definition. Returns false on a duplicate.
    pub fn declare_method(&mut self, receiver: TypeId, signature: Signature) -> bool {
        let methods = self.methods.entry(receiver).or_default();
        if methods.contains_key(&signature.name) {
            return false;
        }
        methods.insert(Arc::clone(&signature.name), signature);
        true
    }

    pub fn type_named(&self, name: &str, arity: u32) -> Option<TypeId> {
        self.types
            .get(name)
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|&&(declared, _)| declared == arity)
                    .map(|&(_, definition)| definition)
            })
            .or_else(|| self.outer()?.type_named(name, arity))
    }

    pub fn function(&self, name: &str) -> Option<&Signature> {
        self.functions
            .get(name)
            .or_else(|| self.outer()?.function(name))
    }

    pub fn method(&self, receiver: TypeId, name: &str) -> Option<&Signature> {
        self.methods
            .get(&receiver)
            .and_then(|methods| methods.get(name))
            .or_else(|| self.outer()?.method(receiver, name))
    }

    /// Number of types declared directly in this table.
    pub fn type_count(&self) -> usize {
        self.types.values().map(SmallVec::len).sum()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.values().map(FxHashMap::len).sum()
    }
}
