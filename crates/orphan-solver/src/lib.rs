//! Canonical type identities.
//!
//! Types are interned: structurally equal `TypeKey`s always map to the same
//! `TypeId`, so identity comparison is a u32 comparison and never depends on
//! how a type was spelled in source.
//!
//! - `types` - `TypeId`, `TypeKey`, `IntrinsicKind`
//! - `intern` - `TypeInterner` (concurrent, `DashMap` backed)
//! - `type_queries` - generic-instance queries, awaited type, instantiation
//! - `format` - display strings for logs and test assertions

pub mod types;
pub use types::{IntrinsicKind, TypeId, TypeKey};

mod intern;
pub use intern::TypeInterner;

pub mod type_queries;

mod format;
pub use format::TypeFormatter;
