use super::*;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    for kind in IntrinsicKind::ALL {
        assert_eq!(interner.lookup(kind.type_id()), Some(TypeData::Intrinsic(kind)));
        assert_eq!(interner.intern(TypeData::Intrinsic(kind)), kind.type_id());
    }
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let a1 = interner.placeholder("Node");
    let a2 = interner.placeholder("Node");
    let b = interner.placeholder("Edge");
    let wrapped = interner.forward_ref("Node");

    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert_ne!(a1, wrapped);
    assert!(!a1.is_intrinsic());
}

#[test]
fn test_lookup_round_trips_structure() {
    let interner = TypeInterner::new();
    let name = interner.intern_string("Edge");

    let id = interner.forward_ref("Edge");
    match interner.lookup(id) {
        Some(TypeData::ForwardRef(atom)) => assert_eq!(atom, name),
        other => panic!("Expected forward ref, got {:?}", other),
    }
    assert_eq!(interner.lookup(TypeId(u32::MAX)), None);
}

#[test]
fn test_union_keeps_order_and_drops_exact_duplicates() {
    let interner = TypeInterner::new();
    let node = interner.placeholder("Node");

    let union = interner.union(vec![node, TypeId::INT, node, TypeId::STR]);
    let Some(TypeData::Union(shape_id)) = interner.lookup(union) else {
        panic!("Expected union");
    };
    let shape = interner.union_shape(shape_id).expect("shape interned");
    assert_eq!(&*interner.type_list(shape.members), &[node, TypeId::INT, TypeId::STR]);
    assert_eq!(interner.resolve_atom(shape.origin), "Union");
    assert_eq!(shape.name, None);
    assert!(shape.inst);
}

#[test]
fn test_union_degenerate_cases() {
    let interner = TypeInterner::new();

    assert_eq!(interner.union(vec![]), TypeId::NEVER);
    assert_eq!(interner.union(vec![TypeId::INT]), TypeId::INT);
    assert_eq!(interner.union(vec![TypeId::INT, TypeId::INT]), TypeId::INT);
}

#[test]
fn test_union_does_not_flatten_nested_unions() {
    let interner = TypeInterner::new();
    let inner = interner.union(vec![TypeId::INT, TypeId::STR]);
    let outer = interner.union(vec![inner, TypeId::BYTES]);

    let Some(TypeData::Union(shape_id)) = interner.lookup(outer) else {
        panic!("Expected union");
    };
    let shape = interner.union_shape(shape_id).expect("shape interned");
    assert_eq!(&*interner.type_list(shape.members), &[inner, TypeId::BYTES]);
}

#[test]
fn test_union_records_type_parameters() {
    let interner = TypeInterner::new();
    let t = interner.type_param("T");
    let u = interner.type_param("U");
    let inner = interner.union(vec![u, TypeId::NONE]);

    let union = interner.union(vec![t, inner, t, TypeId::INT]);
    let Some(TypeData::Union(shape_id)) = interner.lookup(union) else {
        panic!("Expected union");
    };
    let shape = interner.union_shape(shape_id).expect("shape interned");
    assert_eq!(&*interner.type_list(shape.parameters), &[t, u]);
}

#[test]
fn test_optional_has_display_name() {
    let interner = TypeInterner::new();
    let node = interner.placeholder("Node");

    let optional = interner.optional(node);
    let Some(TypeData::Union(shape_id)) = interner.lookup(optional) else {
        panic!("Expected union");
    };
    let shape = interner.union_shape(shape_id).expect("shape interned");
    assert_eq!(shape.name.map(|n| interner.resolve_atom(n)), Some("Optional".to_string()));
    assert_eq!(&*interner.type_list(shape.members), &[node, TypeId::NONE]);

    assert_ne!(optional, interner.union(vec![node, TypeId::NONE]));
    assert_eq!(interner.optional(TypeId::NONE), TypeId::NONE);
}

#[test]
fn test_application_interns_args() {
    let interner = TypeInterner::new();
    let node = interner.placeholder("Node");

    let a = interner.application("List", &[node]);
    let b = interner.application("List", &[node]);
    assert_eq!(a, b);

    let Some(TypeData::Application(app_id)) = interner.lookup(a) else {
        panic!("Expected application");
    };
    let app = interner.type_application(app_id).expect("application interned");
    assert_eq!(interner.resolve_atom(app.base), "List");
    assert_eq!(&*interner.type_list(app.args), &[node]);
}

#[test]
fn test_empty_type_list() {
    let interner = TypeInterner::new();

    assert_eq!(interner.intern_type_list(&[]), TypeListId::EMPTY);
    assert!(interner.type_list(TypeListId::EMPTY).is_empty());
    assert!(interner.type_list(TypeListId(9999)).is_empty());
}
