//! Collection of placeholders that are still unresolved.
//!
//! Resolution is best-effort: names missing from the table stay textual.
//! `pending_references` reports which names those are, looking at exactly
//! the positions the walker rewrites (owned annotation sets of the whole
//! resolution order, nested-declaration sets, union members). Arguments of
//! generic applications are not reported because resolution never reaches
//! them.

use crate::annotations::AnnotationSet;
use crate::def::{DefId, MemberKind};
use crate::intern::TypeInterner;
use crate::registry::TypeRegistry;
use crate::types::{TypeData, TypeId};
use fwdref_common::interner::Atom;
use fwdref_common::limits::MAX_HINT_DEPTH;
use indexmap::IndexSet;

/// Distinct placeholder names still reachable from `subject`, in the order
/// they are first met.
pub fn pending_references(registry: &TypeRegistry, subject: DefId) -> Vec<Atom> {
    let store = registry.declarations();
    let interner = registry.interner();
    let mut names = IndexSet::new();

    let mut chain = store.mro(subject).unwrap_or_default();
    if chain.is_empty() {
        chain.push(subject);
    }

    for ancestor in chain {
        let Some(decl) = store.get(ancestor) else {
            continue;
        };
        if let Some(annotations) = &decl.annotations {
            collect_set(interner, annotations, &mut names);
        }
        for member in decl.members.values() {
            match &member.kind {
                MemberKind::Callable(annotations) => collect_set(interner, annotations, &mut names),
                MemberKind::Nested(def_id) => {
                    if let Some(annotations) = store.annotations(*def_id) {
                        collect_set(interner, &annotations, &mut names);
                    }
                }
                MemberKind::Value => {}
            }
        }
    }

    names.into_iter().collect()
}

fn collect_set(interner: &TypeInterner, annotations: &AnnotationSet, names: &mut IndexSet<Atom>) {
    for hint in annotations.values() {
        collect_hint(interner, hint, names, 0);
    }
}

fn collect_hint(interner: &TypeInterner, hint: TypeId, names: &mut IndexSet<Atom>, depth: u32) {
    if depth > MAX_HINT_DEPTH {
        return;
    }
    match interner.lookup(hint) {
        Some(TypeData::Placeholder(name) | TypeData::ForwardRef(name)) => {
            names.insert(name);
        }
        Some(TypeData::Union(shape_id)) => {
            let Some(shape) = interner.union_shape(shape_id) else {
                return;
            };
            for &member in interner.type_list(shape.members).iter() {
                collect_hint(interner, member, names, depth + 1);
            }
        }
        _ => {}
    }
}
