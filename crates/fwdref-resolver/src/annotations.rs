//! Annotation sets and the per-set resolver.

use crate::extract::TypeHintResolver;
use crate::types::TypeId;
use fwdref_common::interner::Atom;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

/// Mapping from attribute (or parameter) name to its declared hint.
///
/// Insertion order is kept so resolved sets read back in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    entries: IndexMap<Atom, TypeId>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a hint, returning the previous one.
    pub fn insert(&mut self, name: Atom, hint: TypeId) -> Option<TypeId> {
        self.entries.insert(name, hint)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: Atom, hint: TypeId) -> Self {
        self.entries.insert(name, hint);
        self
    }

    pub fn get(&self, name: Atom) -> Option<TypeId> {
        self.entries.get(&name).copied()
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, TypeId)> + '_ {
        self.entries.iter().map(|(name, hint)| (*name, *hint))
    }

    pub fn values(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.entries.values().copied()
    }
}

impl FromIterator<(Atom, TypeId)> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = (Atom, TypeId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resolve every hint in `annotations` in place.
///
/// Keys are snapshotted first; each value is replaced by its resolved form.
/// Running this twice with the same table changes nothing the second time.
pub fn resolve_annotation_set(annotations: &mut AnnotationSet, resolver: &mut TypeHintResolver<'_>) {
    let keys: SmallVec<[Atom; 8]> = annotations.entries.keys().copied().collect();
    for key in keys {
        let Some(hint) = annotations.get(key) else {
            continue;
        };
        let resolved = resolver.resolve_hint(hint);
        if resolved != hint {
            trace!(key = key.0, from = hint.0, to = resolved.0, "annotation rewritten");
            annotations.entries.insert(key, resolved);
        }
    }
}
