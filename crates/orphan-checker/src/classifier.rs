//! Handle classification.
//!
//! Configured shapes are resolved to type identities once, when the
//! classifier is built. Classification then compares identities only: a
//! display string never takes part in matching.

use crate::host::TypeIdentity;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// One entry of the handle family: a definition name and whether its
/// instantiations carry a value. Value-carrying shapes have one type
/// parameter; value-less shapes have none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleShape {
    pub name: String,
    pub value_carrying: bool,
}

impl HandleShape {
    pub fn new(name: impl Into<String>, value_carrying: bool) -> Self {
        HandleShape {
            name: name.into(),
            value_carrying,
        }
    }

    pub fn arity(&self) -> u32 {
        u32::from(self.value_carrying)
    }
}

/// Definitions registered when no shapes are configured.
pub const DEFAULT_HANDLE_FAMILY: [&str; 4] = [
    "Task",
    "ValueTask",
    "ConfiguredTaskAwaitable",
    "ConfiguredValueTaskAwaitable",
];

/// Ordered list of handle shapes supplied at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleShapeConfig {
    pub shapes: Vec<HandleShape>,
}

impl HandleShapeConfig {
    pub fn new(shapes: Vec<HandleShape>) -> Self {
        HandleShapeConfig { shapes }
    }
}

impl Default for HandleShapeConfig {
    /// `Task` and `ValueTask` plus their `ConfigureAwait` wrappers, each in
    /// its value-less and value-carrying form.
    fn default() -> Self {
        let mut shapes = Vec::with_capacity(DEFAULT_HANDLE_FAMILY.len() * 2);
        for name in DEFAULT_HANDLE_FAMILY {
            shapes.push(HandleShape::new(name, false));
            shapes.push(HandleShape::new(name, true));
        }
        HandleShapeConfig { shapes }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Classification {
    pub is_handle: bool,
    pub is_value_carrying: bool,
}

impl Classification {
    pub const NOT_HANDLE: Classification = Classification {
        is_handle: false,
        is_value_carrying: false,
    };
    pub const VALUE_LESS: Classification = Classification {
        is_handle: true,
        is_value_carrying: false,
    };
    pub const VALUE_CARRYING: Classification = Classification {
        is_handle: true,
        is_value_carrying: true,
    };
}

/// Classifies types against a resolved shape set, memoizing per identity.
///
/// The memo is the only shared mutable state of the pass. It is safe to
/// share across threads and across runs over the same type universe:
/// classification is a pure function of the identity and the shape set, so
/// a first-access race only computes the same answer twice.
pub struct HandleClassifier<T: Copy + Eq + Hash> {
    value_less: Vec<T>,
    value_carrying: Vec<T>,
    memo: DashMap<T, Classification, FxBuildHasher>,
}

impl<T: Copy + Eq + Hash + Debug> HandleClassifier<T> {
    /// Resolve `config` against `identity`. Shapes that name no declared
    /// type are skipped.
    pub fn new<I>(identity: &I, config: &HandleShapeConfig) -> Self
    where
        I: TypeIdentity<Type = T> + ?Sized,
    {
        let mut value_less = Vec::new();
        let mut value_carrying = Vec::new();
        for shape in &config.shapes {
            match identity.lookup_definition(&shape.name, shape.arity()) {
                Some(definition) => {
                    debug!(name = %shape.name, value_carrying = shape.value_carrying, ?definition, "resolved handle shape");
                    if shape.value_carrying {
                        value_carrying.push(definition);
                    } else {
                        value_less.push(definition);
                    }
                }
                None => {
                    debug!(name = %shape.name, arity = shape.arity(), "handle shape does not resolve; skipped");
                }
            }
        }
        HandleClassifier {
            value_less,
            value_carrying,
            memo: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Number of shapes that resolved.
    pub fn resolved_shape_count(&self) -> usize {
        self.value_less.len() + self.value_carrying.len()
    }

    /// Number of memoized classifications.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    pub fn classify<I>(&self, identity: &I, ty: T) -> Classification
    where
        I: TypeIdentity<Type = T> + ?Sized,
    {
        if let Some(cached) = self.memo.get(&ty) {
            return *cached;
        }
        let result = self.compute(identity, ty);
        trace!(ty = %identity.display(ty), ?result, "classified type");
        *self.memo.entry(ty).or_insert(result)
    }

    fn compute<I>(&self, identity: &I, ty: T) -> Classification
    where
        I: TypeIdentity<Type = T> + ?Sized,
    {
        // Fail closed: a broken type must never look like a handle.
        if identity.is_error(ty) {
            return Classification::NOT_HANDLE;
        }
        if identity.is_generic_instance(ty) {
            if identity.type_arguments(ty).len() != 1 {
                return Classification::NOT_HANDLE;
            }
            return match identity.unconstructed_definition(ty) {
                Some(definition) if self.value_carrying.contains(&definition) => {
                    Classification::VALUE_CARRYING
                }
                _ => Classification::NOT_HANDLE,
            };
        }
        if self.value_less.contains(&ty) {
            Classification::VALUE_LESS
        } else {
            Classification::NOT_HANDLE
        }
    }
}

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod tests;
