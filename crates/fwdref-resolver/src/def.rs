//! Declaration identifiers and storage.
//!
//! A resolver cannot discover attributes and ancestors by reflection, so
//! every class or function is described explicitly when it is declared:
//! its name, its bases, the annotations it carries itself, and the members
//! it owns. This is phase one of the declare-then-resolve pipeline; the
//! walker in [`crate::walk`] is phase two.
//!
//! The resolution order of a class is computed once, at declaration time,
//! from the already-declared bases.

use crate::annotations::AnnotationSet;
use crate::error::ResolveError;
use crate::mro;
use crate::types::TypeId;
use dashmap::DashMap;
use fwdref_common::interner::Atom;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

// =============================================================================
// DefId
// =============================================================================

/// Identifier of a declared class or function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// DeclKind / Member
// =============================================================================

/// Kind of declaration.
///
/// | Kind | Ancestor chain | Annotations resolved |
/// |------|----------------|----------------------|
/// | Class | itself + C3 order of bases | own fields, every member, every ancestor |
/// | Function | none | its own parameter/return set |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Function,
}

/// What an owned attribute holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    /// A method or other callable carrying its own annotation set.
    Callable(AnnotationSet),
    /// A nested class or function; its own annotation set is resolved.
    Nested(DefId),
    /// A plain value with nothing to resolve.
    Value,
}

/// One attribute owned directly by a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: Atom,
    pub kind: MemberKind,
}

impl Member {
    pub fn annotations(&self) -> Option<&AnnotationSet> {
        match &self.kind {
            MemberKind::Callable(set) => Some(set),
            _ => None,
        }
    }
}

// =============================================================================
// Declaration
// =============================================================================

/// Complete description of one declared class or function.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub kind: DeclKind,

    /// Name the declaration is registered under in symbol tables.
    pub name: Atom,

    /// Direct bases, in declaration order (classes only).
    pub bases: Vec<DefId>,

    /// Resolution order, self first. Filled in by `DeclarationStore::declare`.
    pub mro: Vec<DefId>,

    /// Field annotations of a class, or parameter/return annotations of a function.
    pub annotations: Option<AnnotationSet>,

    /// Attributes owned directly (never inherited ones).
    pub members: IndexMap<Atom, Member>,
}

impl Declaration {
    /// A class with no bases, fields, or members yet.
    pub fn class(name: Atom) -> Self {
        Self {
            kind: DeclKind::Class,
            name,
            bases: Vec::new(),
            mro: Vec::new(),
            annotations: None,
            members: IndexMap::new(),
        }
    }

    /// A free function with the given parameter/return annotations.
    pub fn function(name: Atom, annotations: AnnotationSet) -> Self {
        Self {
            kind: DeclKind::Function,
            name,
            bases: Vec::new(),
            mro: Vec::new(),
            annotations: Some(annotations),
            members: IndexMap::new(),
        }
    }

    pub fn with_bases(mut self, bases: Vec<DefId>) -> Self {
        self.bases = bases;
        self
    }

    /// Add a field annotation to the declaration's own set.
    pub fn with_field(mut self, name: Atom, hint: TypeId) -> Self {
        self.annotations
            .get_or_insert_with(AnnotationSet::new)
            .insert(name, hint);
        self
    }

    /// Replace the declaration's own annotation set.
    pub fn with_annotations(mut self, annotations: AnnotationSet) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Add a method carrying the given annotation set.
    pub fn with_method(self, name: Atom, annotations: AnnotationSet) -> Self {
        self.with_member(name, MemberKind::Callable(annotations))
    }

    /// Add a nested declaration as an attribute.
    pub fn with_nested(self, name: Atom, def_id: DefId) -> Self {
        self.with_member(name, MemberKind::Nested(def_id))
    }

    /// Add a plain value attribute.
    pub fn with_value(self, name: Atom) -> Self {
        self.with_member(name, MemberKind::Value)
    }

    fn with_member(mut self, name: Atom, kind: MemberKind) -> Self {
        self.members.insert(name, Member { name, kind });
        self
    }

    pub fn is_class(&self) -> bool {
        self.kind == DeclKind::Class
    }
}

// =============================================================================
// DeclarationStore
// =============================================================================

/// Thread-safe storage for declarations.
///
/// Uses `DashMap` so the walker can rewrite one declaration's annotations
/// while other declarations stay readable.
pub struct DeclarationStore {
    definitions: DashMap<DefId, Declaration>,
    next_id: AtomicU32,
}

impl Default for DeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self {
            definitions: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> DefId {
        DefId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a declaration and return its `DefId`.
    ///
    /// Every base must already be declared. For classes the C3 resolution
    /// order is computed here and stored on the declaration.
    pub fn declare(&self, mut info: Declaration) -> Result<DefId, ResolveError> {
        let id = self.allocate();

        if let Some(&base) = info.bases.iter().find(|base| !self.contains(**base)) {
            return Err(ResolveError::UnknownBase {
                declaration: id,
                base,
            });
        }

        info.mro = match info.kind {
            DeclKind::Class => mro::linearize(id, &info.bases, |base| self.mro(base))?,
            DeclKind::Function => Vec::new(),
        };

        trace!(
            def_id = %id.0,
            kind = ?info.kind,
            bases = info.bases.len(),
            members = info.members.len(),
            "DeclarationStore::declare"
        );
        self.definitions.insert(id, info);
        Ok(id)
    }

    /// Get a copy of a declaration.
    pub fn get(&self, id: DefId) -> Option<Declaration> {
        self.definitions.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn name(&self, id: DefId) -> Option<Atom> {
        self.definitions.get(&id).map(|r| r.name)
    }

    pub fn kind(&self, id: DefId) -> Option<DeclKind> {
        self.definitions.get(&id).map(|r| r.kind)
    }

    /// Resolution order of a class (self first); empty for functions.
    pub fn mro(&self, id: DefId) -> Option<Vec<DefId>> {
        self.definitions.get(&id).map(|r| r.mro.clone())
    }

    /// The declaration's own annotation set, if it has one.
    pub fn annotations(&self, id: DefId) -> Option<AnnotationSet> {
        self.definitions
            .get(&id)
            .and_then(|r| r.annotations.clone())
    }

    /// Annotation set of one directly owned member, if it carries one.
    pub fn member_annotations(&self, id: DefId, member: Atom) -> Option<AnnotationSet> {
        self.definitions
            .get(&id)
            .and_then(|r| r.members.get(&member).and_then(Member::annotations).cloned())
    }

    /// Run `f` with exclusive access to one declaration.
    ///
    /// The entry stays locked for the duration of `f`; `f` must not call
    /// back into the store for the same shard.
    pub(crate) fn with_declaration_mut<R>(
        &self,
        id: DefId,
        f: impl FnOnce(&mut Declaration) -> R,
    ) -> Option<R> {
        self.definitions.get_mut(&id).map(|mut entry| f(&mut entry))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All declared ids, in allocation order.
    pub fn all_ids(&self) -> Vec<DefId> {
        let mut ids: Vec<DefId> = self.definitions.iter().map(|r| *r.key()).collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
