//! Hierarchy walker.
//!
//! Visits every declaration of a resolution order and resolves what each one
//! owns directly:
//!
//! 1. its own annotation set (class fields or function signature), if any
//! 2. for each member: a callable's annotation set, or a nested
//!    declaration's own annotation set; plain values are skipped
//!
//! Ancestors are visited independently, so a member overridden in a subclass
//! is resolved once in the subclass and once in the base that declared it.

use crate::annotations::resolve_annotation_set;
use crate::def::{Declaration, DeclarationStore, DefId, MemberKind};
use crate::extract::TypeHintResolver;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Resolve every owned annotation set of every declaration in `chain`.
pub fn walk_hierarchy(
    store: &DeclarationStore,
    chain: &[DefId],
    resolver: &mut TypeHintResolver<'_>,
) {
    for &ancestor in chain {
        let nested = store.with_declaration_mut(ancestor, |decl| resolve_owned(decl, resolver));
        let Some(nested) = nested else {
            debug!(ancestor = %ancestor, "ancestor not declared, skipping");
            continue;
        };

        // Nested declarations are separate entries; resolve them after the
        // ancestor's entry has been released.
        for def_id in nested {
            resolve_own_annotations(store, def_id, resolver);
        }
    }
}

/// Resolve the declaration's own annotation set only.
///
/// Returns `false` when the declaration is unknown or has no annotation set.
pub fn resolve_own_annotations(
    store: &DeclarationStore,
    def_id: DefId,
    resolver: &mut TypeHintResolver<'_>,
) -> bool {
    store
        .with_declaration_mut(def_id, |decl| match decl.annotations.as_mut() {
            Some(annotations) => {
                resolve_annotation_set(annotations, resolver);
                true
            }
            None => false,
        })
        .unwrap_or(false)
}

fn resolve_owned(
    decl: &mut Declaration,
    resolver: &mut TypeHintResolver<'_>,
) -> SmallVec<[DefId; 4]> {
    if let Some(annotations) = decl.annotations.as_mut() {
        resolve_annotation_set(annotations, resolver);
    }

    let mut nested = SmallVec::new();
    for member in decl.members.values_mut() {
        match &mut member.kind {
            MemberKind::Callable(annotations) => {
                trace!(member = member.name.0, "resolving member annotations");
                resolve_annotation_set(annotations, resolver);
            }
            MemberKind::Nested(def_id) => nested.push(*def_id),
            MemberKind::Value => {}
        }
    }
    nested
}

#[cfg(test)]
#[path = "../tests/walk_tests.rs"]
mod tests;
