//! Public entry points.
//!
//! | Operation | Table | Registers |
//! |-----------|-------|-----------|
//! | [`resolve`] | registry namespace | the subject |
//! | [`resolve_with`] | caller's table | the subject |
//! | [`resolver`] | captured (either of the above) | the subject, per call |
//! | [`resolve_all`] | registry namespace | every subject, up front |
//! | [`resolve_all_with`] | caller's table | every subject, up front |
//!
//! The forms without a table write into the registry namespace and those
//! bindings persist. Pass an explicit table to keep a resolution private.

use crate::def::{DeclKind, DefId};
use crate::error::ResolveError;
use crate::extract::TypeHintResolver;
use crate::registry::TypeRegistry;
use crate::symbols::SymbolTable;
use crate::walk::{resolve_own_annotations, walk_hierarchy};
use fwdref_common::interner::Atom;
use tracing::{debug, debug_span};

/// Resolve `subject` against the registry namespace.
///
/// The subject is bound under its own name first so it can refer to itself.
/// Returns the same `DefId`; the declaration's annotations are rewritten in
/// place.
pub fn resolve(registry: &TypeRegistry, subject: DefId) -> Result<DefId, ResolveError> {
    let mut namespace = registry
        .namespace()
        .write()
        .expect("namespace lock poisoned");
    resolve_with(registry, subject, &mut namespace)
}

/// Resolve `subject` against an explicit table.
pub fn resolve_with(
    registry: &TypeRegistry,
    subject: DefId,
    table: &mut SymbolTable,
) -> Result<DefId, ResolveError> {
    let name = subject_name(registry, subject)?;
    if registry.options().register_subject {
        table.insert(name, registry.identity(subject));
    }
    resolve_subject(registry, subject, table);
    Ok(subject)
}

/// Deferred form of [`resolve`] / [`resolve_with`].
///
/// Returns a closure that resolves whatever it is applied to, against `table`
/// when one is given, otherwise against the registry namespace. The closure
/// keeps the table, so successive applications see each other's bindings.
pub fn resolver(
    registry: &TypeRegistry,
    table: Option<SymbolTable>,
) -> impl FnMut(DefId) -> Result<DefId, ResolveError> + '_ {
    let mut table = table;
    move |subject| match table.as_mut() {
        Some(table) => resolve_with(registry, subject, table),
        None => resolve(registry, subject),
    }
}

/// Resolve a cohort of mutually referencing declarations against the
/// registry namespace.
///
/// Every subject is bound before any is walked, so each can forward-reference
/// any sibling.
pub fn resolve_all(registry: &TypeRegistry, subjects: &[DefId]) -> Result<(), ResolveError> {
    let mut namespace = registry
        .namespace()
        .write()
        .expect("namespace lock poisoned");
    resolve_all_with(registry, subjects, &mut namespace)
}

/// [`resolve_all`] against an explicit table.
pub fn resolve_all_with(
    registry: &TypeRegistry,
    subjects: &[DefId],
    table: &mut SymbolTable,
) -> Result<(), ResolveError> {
    let names = subjects
        .iter()
        .map(|&subject| subject_name(registry, subject))
        .collect::<Result<Vec<Atom>, ResolveError>>()?;

    for (&subject, name) in subjects.iter().zip(names) {
        table.insert(name, registry.identity(subject));
    }
    for &subject in subjects {
        resolve_subject(registry, subject, table);
    }
    Ok(())
}

fn subject_name(registry: &TypeRegistry, subject: DefId) -> Result<Atom, ResolveError> {
    let name = registry
        .declarations()
        .name(subject)
        .ok_or(ResolveError::UnknownDeclaration(subject))?;
    if name.is_none() {
        return Err(ResolveError::AnonymousDeclaration(subject));
    }
    Ok(name)
}

/// Walk the subject's resolution order, or resolve a function's single
/// annotation set when it has no ancestors.
fn resolve_subject(registry: &TypeRegistry, subject: DefId, table: &SymbolTable) {
    let _span = debug_span!("resolve", subject = %subject).entered();
    let store = registry.declarations();
    let mut resolver =
        TypeHintResolver::with_max_depth(registry.interner(), table, registry.options().max_depth);

    let chain = store.mro(subject).unwrap_or_default();
    match store.kind(subject) {
        Some(DeclKind::Class) if !chain.is_empty() => {
            walk_hierarchy(store, &chain, &mut resolver);
        }
        _ => {
            if !resolve_own_annotations(store, subject, &mut resolver) {
                debug!("subject has no annotations and no ancestors");
            }
        }
    }

    let stats = resolver.stats();
    debug!(
        ancestors = chain.len(),
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        composites_rebuilt = stats.composites_rebuilt,
        depth_exceeded = resolver.depth_exceeded(),
        "resolution finished"
    );
}

#[cfg(test)]
#[path = "../tests/entry_tests.rs"]
mod tests;
