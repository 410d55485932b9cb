use super::*;
use crate::type_queries::*;
use crate::{IntrinsicKind, TypeFormatter, TypeId};
use rayon::prelude::*;

#[test]
fn test_intrinsics_have_fixed_ids() {
    let interner = TypeInterner::new();
    for kind in IntrinsicKind::ALL {
        assert_eq!(
            interner.lookup(kind.type_id()),
            Some(TypeKey::Intrinsic(kind))
        );
    }
    assert_eq!(IntrinsicKind::from_name("int"), Some(IntrinsicKind::Int));
    assert_eq!(IntrinsicKind::from_name("error"), None);
}

#[test]
fn test_interning_is_structural() {
    let interner = TypeInterner::new();
    let task = interner.definition("Task", 1);
    let a = interner.application(task, &[TypeId::INT]);
    let b = interner.application(task, &[TypeId::INT]);
    let c = interner.application(task, &[TypeId::STRING]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    // Same name, different arity: distinct definitions.
    assert_ne!(interner.definition("Task", 0), task);
}

#[test]
fn test_find_definition_never_creates() {
    let interner = TypeInterner::new();
    let before = interner.len();
    assert_eq!(interner.find_definition("ValueTask", 1), None);
    assert_eq!(interner.len(), before);
    let declared = interner.definition("ValueTask", 1);
    assert_eq!(interner.find_definition("ValueTask", 1), Some(declared));
}

#[test]
fn test_generic_instance_queries() {
    let interner = TypeInterner::new();
    let task = interner.definition("Task", 1);
    let task_int = interner.application(task, &[TypeId::INT]);
    assert!(is_generic_instance(&interner, task_int));
    assert!(!is_generic_instance(&interner, task));
    assert_eq!(unconstructed_definition(&interner, task_int), Some(task));
    assert_eq!(type_arguments(&interner, task_int).as_slice(), &[TypeId::INT]);
    assert_eq!(definition_arity(&interner, task), Some(1));
}

#[test]
fn test_awaited_type() {
    let interner = TypeInterner::new();
    let plain = interner.definition("Task", 0);
    let generic = interner.definition("Task", 1);
    let task_bool = interner.application(generic, &[TypeId::BOOL]);
    assert_eq!(awaited_type(&interner, task_bool), Some(TypeId::BOOL));
    assert_eq!(awaited_type(&interner, plain), Some(TypeId::VOID));
    assert_eq!(awaited_type(&interner, TypeId::INT), None);
}

#[test]
fn test_instantiate_substitutes_parameters() {
    let interner = TypeInterner::new();
    let awaitable = interner.definition("ConfiguredTaskAwaitable", 1);
    let t0 = interner.type_parameter(0);
    let open = interner.application(awaitable, &[t0]);
    let closed = instantiate(&interner, open, &[TypeId::STRING]);
    assert_eq!(closed, interner.application(awaitable, &[TypeId::STRING]));
    assert_eq!(instantiate(&interner, t0, &[]), TypeId::ERROR);
    assert_eq!(instantiate(&interner, TypeId::INT, &[TypeId::STRING]), TypeId::INT);
}

#[test]
fn test_contains_error() {
    let interner = TypeInterner::new();
    let task = interner.definition("Task", 1);
    assert!(contains_error(&interner, TypeId::ERROR));
    assert!(contains_error(&interner, interner.application(task, &[TypeId::ERROR])));
    assert!(!contains_error(&interner, interner.application(task, &[TypeId::INT])));
    assert!(contains_error(&interner, TypeId(9_999)));
}

#[test]
fn test_format() {
    let interner = TypeInterner::new();
    let task = interner.definition("Task", 1);
    let nested = interner.application(task, &[interner.application(task, &[TypeId::INT])]);
    let formatter = TypeFormatter::new(&interner);
    assert_eq!(formatter.format(nested), "Task<Task<int>>");
    assert_eq!(formatter.format(task), "Task<>");
    assert_eq!(formatter.format(interner.definition("Task", 0)), "Task");
}

#[test]
fn test_concurrent_interning_agrees() {
    let interner = TypeInterner::new();
    let task = interner.definition("Task", 1);
    let ids: Vec<TypeId> = (0..256)
        .into_par_iter()
        .map(|i| {
            let arg = if i % 2 == 0 { TypeId::INT } else { TypeId::STRING };
            interner.application(task, &[arg])
        })
        .collect();
    let int_id = interner.application(task, &[TypeId::INT]);
    let string_id = interner.application(task, &[TypeId::STRING]);
    for (i, id) in ids.iter().enumerate() {
        let expected = if i % 2 == 0 { int_id } else { string_id };
        assert_eq!(*id, expected);
        assert!(interner.lookup(*id).is_some());
    }
}
