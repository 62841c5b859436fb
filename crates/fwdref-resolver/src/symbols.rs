//! Symbol tables: the name → type registry placeholders are resolved against.

use crate::types::TypeId;
use fwdref_common::interner::Atom;
use rustc_hash::FxHashMap;

/// Mapping from name to type identity.
///
/// Keys are unique; binding a name twice keeps the later value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: FxHashMap<Atom, TypeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, returning the binding it replaced.
    pub fn insert(&mut self, name: Atom, ty: TypeId) -> Option<TypeId> {
        self.entries.insert(name, ty)
    }

    pub fn get(&self, name: Atom) -> Option<TypeId> {
        self.entries.get(&name).copied()
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn remove(&mut self, name: Atom) -> Option<TypeId> {
        self.entries.remove(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, TypeId)> + '_ {
        self.entries.iter().map(|(name, ty)| (*name, *ty))
    }
}

impl Extend<(Atom, TypeId)> for SymbolTable {
    fn extend<I: IntoIterator<Item = (Atom, TypeId)>>(&mut self, iter: I) {
        for (name, ty) in iter {
            self.entries.insert(name, ty);
        }
    }
}

impl FromIterator<(Atom, TypeId)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (Atom, TypeId)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
