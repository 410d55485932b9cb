//! Structural queries over interned types.

use crate::intern::TypeInterner;
use crate::types::{TypeId, TypeKey};
use smallvec::SmallVec;

/// `(definition, args)` when `ty` is a generic instantiation.
pub fn application_parts(
    interner: &TypeInterner,
    ty: TypeId,
) -> Option<(TypeId, SmallVec<[TypeId; 2]>)> {
    match interner.lookup(ty)? {
        TypeKey::Application { definition, args } => Some((definition, args)),
        _ => None,
    }
}

pub fn is_generic_instance(interner: &TypeInterner, ty: TypeId) -> bool {
    application_parts(interner, ty).is_some()
}

/// The unconstructed generic definition of an instantiation.
pub fn unconstructed_definition(interner: &TypeInterner, ty: TypeId) -> Option<TypeId> {
    application_parts(interner, ty).map(|(definition, _)| definition)
}

pub fn type_arguments(interner: &TypeInterner, ty: TypeId) -> SmallVec<[TypeId; 2]> {
    application_parts(interner, ty)
        .map(|(_, args)| args)
        .unwrap_or_default()
}

/// Declared arity of a definition, `None` for anything else.
pub fn definition_arity(interner: &TypeInterner, ty: TypeId) -> Option<u32> {
    match interner.lookup(ty)? {
        TypeKey::Definition { arity, .. } => Some(arity),
        _ => None,
    }
}

/// Result type of `await`ing a value of type `ty`.
///
/// A single-argument instantiation yields its argument; a non-generic
/// declared type yields `void`. Anything else has no awaited type.
pub fn awaited_type(interner: &TypeInterner, ty: TypeId) -> Option<TypeId> {
    match interner.lookup(ty)? {
        TypeKey::Application { args, .. } if args.len() == 1 => args.first().copied(),
        TypeKey::Definition { arity: 0, .. } => Some(TypeId::VOID),
        _ => None,
    }
}

/// Substitute positional type parameters with `args`.
///
/// Parameters without a matching argument become the error type.
pub fn instantiate(interner: &TypeInterner, ty: TypeId, args: &[TypeId]) -> TypeId {
    match interner.lookup(ty) {
        Some(TypeKey::TypeParameter { index }) => args
            .get(index as usize)
            .copied()
            .unwrap_or(TypeId::ERROR),
        Some(TypeKey::Application {
            definition,
            args: inner,
        }) => {
            let substituted: SmallVec<[TypeId; 2]> = inner
                .iter()
                .map(|&arg| instantiate(interner, arg, args))
                .collect();
            if substituted == inner {
                ty
            } else {
                interner.application(definition, &substituted)
            }
        }
        _ => ty,
    }
}

/// True when `ty` is, or is built from, the error type.
pub fn contains_error(interner: &TypeInterner, ty: TypeId) -> bool {
    if ty.is_error() {
        return true;
    }
    match interner.lookup(ty) {
        Some(TypeKey::Application { args, .. }) => {
            args.iter().any(|&arg| contains_error(interner, arg))
        }
        Some(_) => false,
        None => true,
    }
}
