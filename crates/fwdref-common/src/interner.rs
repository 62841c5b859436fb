//! String interner for declaration, attribute and placeholder names.
//!
//! Names are interned into a shared pool and passed around as u32 handles
//! (Atoms). Symbol table lookups and annotation keys then compare integers
//! instead of strings.

use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// Handle to an interned name. Resolve it with [`ShardedInterner::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty string; also used for "no name".
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Atoms carry their shard in the low bits.
const SHARD_BITS: u32 = 4;
const SHARDS: usize = 1 << SHARD_BITS;

/// Names that show up in nearly every annotation set.
const COMMON_STRINGS: &[&str] = &[
    // Builtin type names
    "Any",
    "None",
    "NoReturn",
    "object",
    "bool",
    "int",
    "float",
    "str",
    "bytes",
    // Composite origins and display names
    "Union",
    "Optional",
    // Generic containers
    "List",
    "Dict",
    "Set",
    "Tuple",
    // Common annotation keys
    "return",
    "self",
    "cls",
    "value",
    "other",
    "name",
    "key",
    "item",
    "data",
    "parent",
    "children",
    "next",
];

/// One bucket of the pool. Slot `i` of `names` is the string for local index `i`.
#[derive(Default)]
struct NameShard {
    index: FxHashMap<Arc<str>, u32>,
    names: Vec<Arc<str>>,
}

impl NameShard {
    fn push(&mut self, name: Arc<str>) -> u32 {
        let slot = self.names.len() as u32;
        self.names.push(name.clone());
        self.index.insert(name, slot);
        slot
    }
}

/// Concurrent string pool.
///
/// A name always lands in the same shard (chosen by its hash), so two threads
/// interning the same name contend on one lock and agree on the atom.
pub struct ShardedInterner {
    shards: [RwLock<NameShard>; SHARDS],
}

impl ShardedInterner {
    pub fn new() -> Self {
        let shards: [RwLock<NameShard>; SHARDS] = std::array::from_fn(|_| RwLock::default());
        // Atom::NONE is slot 0 of shard 0.
        shards[0]
            .write()
            .expect("interner shard lock poisoned")
            .push(Arc::from(""));
        Self { shards }
    }

    /// Intern `name`, returning the existing atom if it was seen before.
    pub fn intern(&self, name: &str) -> Atom {
        if name.is_empty() {
            return Atom::NONE;
        }
        let shard = Self::shard_of(name);
        let mut bucket = self.shards[shard]
            .write()
            .expect("interner shard lock poisoned");
        let existing = bucket.index.get(name).copied();
        let slot = match existing {
            Some(slot) => slot,
            None => bucket.push(Arc::from(name)),
        };
        Self::atom_at(shard, slot)
    }

    /// Atom of an already-interned name; never interns.
    pub fn get(&self, name: &str) -> Option<Atom> {
        if name.is_empty() {
            return Some(Atom::NONE);
        }
        let shard = Self::shard_of(name);
        let bucket = self.shards[shard]
            .read()
            .expect("interner shard lock poisoned");
        bucket.index.get(name).map(|&slot| Self::atom_at(shard, slot))
    }

    /// String behind `atom`; the empty string for unknown atoms.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.try_resolve(atom).unwrap_or_else(|| Arc::from(""))
    }

    pub fn try_resolve(&self, atom: Atom) -> Option<Arc<str>> {
        let shard = (atom.0 & (SHARDS as u32 - 1)) as usize;
        let slot = (atom.0 >> SHARD_BITS) as usize;
        let bucket = self.shards[shard]
            .read()
            .expect("interner shard lock poisoned");
        bucket.names.get(slot).cloned()
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|bucket| bucket.read().expect("interner shard lock poisoned").names.len())
            .sum()
    }

    /// True while only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Pre-intern builtin type names and common annotation keys.
    pub fn intern_common(&self) {
        for name in COMMON_STRINGS {
            self.intern(name);
        }
    }

    fn shard_of(name: &str) -> usize {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        (hasher.finish() as usize) & (SHARDS - 1)
    }

    fn atom_at(shard: usize, slot: u32) -> Atom {
        Atom((slot << SHARD_BITS) | shard as u32)
    }
}

impl Default for ShardedInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
