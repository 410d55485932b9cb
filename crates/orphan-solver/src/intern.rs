//! Concurrent type interning.
//!
//! Interning is deduplicating: structurally equal keys return the same
//! `TypeId` no matter which thread interns first. The forward map is the
//! source of truth; the reverse map is written while the forward entry's
//! shard is still locked, so any id a caller can observe is resolvable.

use crate::types::{IntrinsicKind, TypeId, TypeKey};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

pub struct TypeInterner {
    ids: DashMap<TypeKey, TypeId, FxBuildHasher>,
    keys: DashMap<TypeId, TypeKey, FxBuildHasher>,
    next_id: AtomicU32,
}

impl TypeInterner {
    pub fn new() -> TypeInterner {
        let interner = TypeInterner {
            ids: DashMap::with_hasher(FxBuildHasher),
            keys: DashMap::with_hasher(FxBuildHasher),
            next_id: AtomicU32::new(TypeId::FIRST_USER),
        };
        for kind in IntrinsicKind::ALL {
            let key = TypeKey::Intrinsic(kind);
            interner.ids.insert(key.clone(), kind.type_id());
            interner.keys.insert(kind.type_id(), key);
        }
        interner
    }

    /// Intern `key`, returning its canonical id.
    pub fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        *self.ids.entry(key.clone()).or_insert_with(|| {
            let id = TypeId(self.next_id.fetch_add(1, Ordering::Relaxed));
            trace!(?id, ?key, "interned type");
            self.keys.insert(id, key);
            id
        })
    }

    /// Structural key of `id`, `None` for ids this interner never issued.
    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        self.keys.get(&id).map(|key| key.value().clone())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn intrinsic(&self, kind: IntrinsicKind) -> TypeId {
        kind.type_id()
    }

    pub fn definition(&self, name: &str, arity: u32) -> TypeId {
        self.intern(TypeKey::Definition {
            name: Arc::from(name),
            arity,
        })
    }

    pub fn application(&self, definition: TypeId, args: &[TypeId]) -> TypeId {
        self.intern(TypeKey::Application {
            definition,
            args: SmallVec::from_slice(args),
        })
    }

    pub fn type_parameter(&self, index: u32) -> TypeId {
        self.intern(TypeKey::TypeParameter { index })
    }

    /// Id of an already-declared definition. Never creates one.
    pub fn find_definition(&self, name: &str, arity: u32) -> Option<TypeId> {
        let key = TypeKey::Definition {
            name: Arc::from(name),
            arity,
        };
        self.ids.get(&key).map(|id| *id)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

impl std::fmt::Debug for TypeInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInterner")
            .field("types", &self.ids.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
