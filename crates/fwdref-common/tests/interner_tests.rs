use super::*;

#[test]
fn test_intern_deduplicates() {
    let interner = ShardedInterner::new();

    let a1 = interner.intern("Node");
    let a2 = interner.intern("Node");
    let b = interner.intern("Edge");

    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert_eq!(&*interner.resolve(a1), "Node");
    assert_eq!(&*interner.resolve(b), "Edge");
}

#[test]
fn test_empty_string_is_none_atom() {
    let interner = ShardedInterner::new();

    assert_eq!(interner.intern(""), Atom::NONE);
    assert!(Atom::NONE.is_none());
    assert_eq!(&*interner.resolve(Atom::NONE), "");
    assert!(interner.is_empty());
}

#[test]
fn test_get_does_not_intern() {
    let interner = ShardedInterner::new();

    assert_eq!(interner.get("Missing"), None);
    let before = interner.len();
    assert_eq!(interner.get("Missing"), None);
    assert_eq!(interner.len(), before);

    let atom = interner.intern("Present");
    assert_eq!(interner.get("Present"), Some(atom));
}

#[test]
fn test_many_names_stay_distinct() {
    let interner = ShardedInterner::new();
    let atoms: Vec<Atom> = (0..200)
        .map(|i| interner.intern(&format!("T{i}")))
        .collect();

    for (i, atom) in atoms.iter().enumerate() {
        assert!(!atom.is_none());
        assert_eq!(&*interner.resolve(*atom), format!("T{i}"));
    }
    let mut unique = atoms.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), atoms.len());
}

#[test]
fn test_intern_common_prepopulates_builtins() {
    let interner = ShardedInterner::new();
    interner.intern_common();

    assert!(interner.get("int").is_some());
    assert!(interner.get("Optional").is_some());
    assert!(interner.get("return").is_some());
}

#[test]
fn test_concurrent_interning_agrees() {
    let interner = std::sync::Arc::new(ShardedInterner::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = interner.clone();
            std::thread::spawn(move || {
                (0..50)
                    .map(|i| interner.intern(&format!("name{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Atom>> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();
    for other in &results[1..] {
        assert_eq!(&results[0], other);
    }
}
