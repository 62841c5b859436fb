use super::*;
use crate::annotations::AnnotationSet;
use crate::def::Declaration;
use crate::options::ResolveOptions;
use crate::types::TypeId;

fn field(registry: &TypeRegistry, owner: DefId, name: &str) -> Option<TypeId> {
    registry
        .declarations()
        .annotations(owner)
        .and_then(|set| set.get(registry.atom(name)))
}

#[test]
fn test_self_reference_resolves_to_subject() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let node = registry
        .declare(
            Declaration::class(registry.atom("Node"))
                .with_field(registry.atom("next"), interner.optional(interner.placeholder("Node")))
                .with_field(registry.atom("value"), TypeId::INT),
        )
        .expect("declare Node");

    assert_eq!(resolve(&registry, node), Ok(node));

    let next = field(&registry, node, "next").expect("next annotated");
    assert_eq!(next, interner.optional(registry.identity(node)));
    assert_eq!(field(&registry, node, "value"), Some(TypeId::INT));
    assert_eq!(registry.formatter().format(next), "Optional[Node]");
}

#[test]
fn test_base_referring_to_subclass() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let base = registry
        .declare(
            Declaration::class(registry.atom("Base"))
                .with_field(registry.atom("child"), interner.placeholder("Derived")),
        )
        .expect("declare Base");
    let derived = registry
        .declare(Declaration::class(registry.atom("Derived")).with_bases(vec![base]))
        .expect("declare Derived");

    resolve(&registry, derived).expect("resolve Derived");

    assert_eq!(field(&registry, base, "child"), Some(registry.identity(derived)));
}

#[test]
fn test_resolve_all_links_mutual_references() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let node = registry
        .declare(
            Declaration::class(registry.atom("Node"))
                .with_field(registry.atom("edges"), interner.forward_ref("Edge")),
        )
        .expect("declare Node");
    let edge = registry
        .declare(
            Declaration::class(registry.atom("Edge"))
                .with_field(registry.atom("source"), interner.placeholder("Node"))
                .with_field(
                    registry.atom("target"),
                    interner.union(vec![interner.placeholder("Node"), TypeId::NONE]),
                ),
        )
        .expect("declare Edge");

    resolve_all(&registry, &[node, edge]).expect("resolve cohort");

    let node_ty = registry.identity(node);
    assert_eq!(field(&registry, node, "edges"), Some(registry.identity(edge)));
    assert_eq!(field(&registry, edge, "source"), Some(node_ty));
    assert_eq!(
        field(&registry, edge, "target"),
        Some(interner.union(vec![node_ty, TypeId::NONE]))
    );
}

#[test]
fn test_resolve_all_rejects_cohort_before_binding() {
    let registry = TypeRegistry::new();
    let node = registry
        .declare(Declaration::class(registry.atom("Node")))
        .expect("declare Node");

    let err = resolve_all(&registry, &[node, DefId(999)]).unwrap_err();
    assert_eq!(err, ResolveError::UnknownDeclaration(DefId(999)));
    assert_eq!(registry.lookup("Node"), None);
}

#[test]
fn test_function_subject() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let point = registry
        .declare(Declaration::class(registry.atom("Point")))
        .expect("declare Point");
    registry.bind("Point", registry.identity(point));

    let signature = AnnotationSet::new()
        .with(registry.atom("origin"), interner.placeholder("Point"))
        .with(registry.atom("return"), interner.forward_ref("Point"));
    let function = registry
        .declare(Declaration::function(registry.atom("distance"), signature))
        .expect("declare function");

    resolve(&registry, function).expect("resolve function");

    let point_ty = registry.identity(point);
    assert_eq!(field(&registry, function, "origin"), Some(point_ty));
    assert_eq!(field(&registry, function, "return"), Some(point_ty));
}

#[test]
fn test_function_without_annotations_is_noop() {
    let registry = TypeRegistry::new();
    let mut bare = Declaration::function(registry.atom("noop"), AnnotationSet::new());
    bare.annotations = None;
    let function = registry.declare(bare).expect("declare function");

    assert_eq!(resolve(&registry, function), Ok(function));
    assert!(registry.declarations().annotations(function).is_none());
}

#[test]
fn test_unknown_and_anonymous_subjects() {
    let registry = TypeRegistry::new();
    assert_eq!(
        resolve(&registry, DefId(42)),
        Err(ResolveError::UnknownDeclaration(DefId(42)))
    );

    let anonymous = registry
        .declare(Declaration::class(Atom::NONE))
        .expect("declare anonymous");
    assert_eq!(
        resolve(&registry, anonymous),
        Err(ResolveError::AnonymousDeclaration(anonymous))
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let node = registry
        .declare(
            Declaration::class(registry.atom("Node"))
                .with_field(registry.atom("next"), interner.optional(interner.placeholder("Node")))
                .with_field(registry.atom("later"), interner.placeholder("NotYet")),
        )
        .expect("declare Node");

    resolve(&registry, node).expect("first pass");
    let first = registry.declarations().annotations(node);
    resolve(&registry, node).expect("second pass");
    assert_eq!(registry.declarations().annotations(node), first);
}

#[test]
fn test_default_namespace_grows() {
    let registry = TypeRegistry::new();
    let node = registry
        .declare(Declaration::class(registry.atom("Node")))
        .expect("declare Node");

    assert_eq!(registry.lookup("Node"), None);
    resolve(&registry, node).expect("resolve");
    assert_eq!(registry.lookup("Node"), Some(registry.identity(node)));
}

#[test]
fn test_explicit_table_leaves_namespace_untouched() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let other = interner.declared(DefId(77));
    let node = registry
        .declare(
            Declaration::class(registry.atom("Node"))
                .with_field(registry.atom("peer"), interner.placeholder("Peer")),
        )
        .expect("declare Node");

    let mut table = SymbolTable::new();
    table.insert(registry.atom("Peer"), other);
    resolve_with(&registry, node, &mut table).expect("resolve");

    assert_eq!(field(&registry, node, "peer"), Some(other));
    assert_eq!(table.get(registry.atom("Node")), Some(registry.identity(node)));
    assert_eq!(registry.lookup("Node"), None);
}

#[test]
fn test_register_subject_disabled() {
    let registry = TypeRegistry::with_options(ResolveOptions::default().with_register_subject(false));
    let interner = registry.interner();
    let node = registry
        .declare(
            Declaration::class(registry.atom("Node"))
                .with_field(registry.atom("next"), interner.placeholder("Node")),
        )
        .expect("declare Node");

    let mut table = SymbolTable::new();
    resolve_with(&registry, node, &mut table).expect("resolve");

    assert!(table.is_empty());
    assert_eq!(field(&registry, node, "next"), Some(interner.placeholder("Node")));
}

#[test]
fn test_deferred_resolver_shares_its_table() {
    let registry = TypeRegistry::new();
    let interner = registry.interner();
    let first = registry
        .declare(Declaration::class(registry.atom("First")))
        .expect("declare First");
    let second = registry
        .declare(
            Declaration::class(registry.atom("Second"))
                .with_field(registry.atom("prev"), interner.placeholder("First")),
        )
        .expect("declare Second");

    let mut apply = resolver(&registry, Some(SymbolTable::new()));
    assert_eq!(apply(first), Ok(first));
    assert_eq!(apply(second), Ok(second));
    drop(apply);

    assert_eq!(field(&registry, second, "prev"), Some(registry.identity(first)));
    assert_eq!(registry.lookup("First"), None);
}

#[test]
fn test_deferred_resolver_without_table_uses_namespace() {
    let registry = TypeRegistry::new();
    let node = registry
        .declare(Declaration::class(registry.atom("Node")))
        .expect("declare Node");

    let mut apply = resolver(&registry, None);
    assert_eq!(apply(node), Ok(node));
    assert_eq!(registry.lookup("Node"), Some(registry.identity(node)));
}
