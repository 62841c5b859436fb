//! Hash-consing of annotation values.
//!
//! Every `TypeData` is stored once and handed out as a `TypeId`, so two
//! hints are equal exactly when their ids are. Interned structures are
//! immutable: rewriting a composite always interns a new shape, and a shape
//! shared between annotation sets is never changed underneath them.

use crate::def::DefId;
use crate::types::{
    IntrinsicKind, TypeApplication, TypeApplicationId, TypeData, TypeId, TypeListId, UnionShape,
    UnionShapeId,
};
use fwdref_common::interner::{Atom, ShardedInterner};
use fwdref_common::limits::COMPOSITE_INLINE_MEMBERS;
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// `TypeId`s above the intrinsic range carry their shard in the low bits.
const SHARD_BITS: u32 = 4;
const SHARDS: usize = 1 << SHARD_BITS;

pub(crate) type TypeListBuffer = SmallVec<[TypeId; COMPOSITE_INLINE_MEMBERS]>;

#[derive(Default)]
struct TypeShard {
    ids: FxHashMap<TypeData, u32>,
    data: Vec<TypeData>,
}

/// Append-only table giving each distinct value a dense `u32` id.
struct Pool<T: ?Sized> {
    items: Vec<Arc<T>>,
    ids: FxHashMap<Arc<T>, u32>,
}

impl<T: ?Sized + Eq + Hash> Pool<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    /// Id of `key`, storing `make()` the first time it is seen.
    fn intern(&mut self, key: &T, make: impl FnOnce() -> Arc<T>) -> u32 {
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        let value = make();
        let id = self.items.len() as u32;
        self.items.push(Arc::clone(&value));
        self.ids.insert(value, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<T>> {
        self.items.get(id as usize).cloned()
    }
}

/// Interner for annotation values and their side tables.
///
/// Safe to share between threads; every table sits behind its own `RwLock`.
pub struct TypeInterner {
    shards: [RwLock<TypeShard>; SHARDS],
    /// Names of declarations, attributes and placeholders.
    pub string_interner: ShardedInterner,
    /// Slot 0 is the empty list (`TypeListId::EMPTY`).
    type_lists: RwLock<Pool<[TypeId]>>,
    union_shapes: RwLock<Pool<UnionShape>>,
    applications: RwLock<Pool<TypeApplication>>,
    union_atom: Atom,
    optional_atom: Atom,
}

impl TypeInterner {
    pub fn new() -> Self {
        let string_interner = ShardedInterner::new();
        string_interner.intern_common();
        let union_atom = string_interner.intern("Union");
        let optional_atom = string_interner.intern("Optional");

        let mut type_lists: Pool<[TypeId]> = Pool::new();
        type_lists.intern(&[][..], || Arc::from(Vec::new()));

        TypeInterner {
            shards: std::array::from_fn(|_| RwLock::default()),
            string_interner,
            type_lists: RwLock::new(type_lists),
            union_shapes: RwLock::new(Pool::new()),
            applications: RwLock::new(Pool::new()),
            union_atom,
            optional_atom,
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.string_interner.resolve(atom).to_string()
    }

    /// Like [`resolve_atom`](Self::resolve_atom) without allocating.
    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    // -------------------------------------------------------------------------
    // Core intern / lookup
    // -------------------------------------------------------------------------

    /// Canonical `TypeId` for `key`. Intrinsics map to their fixed ids.
    pub fn intern(&self, key: TypeData) -> TypeId {
        if let TypeData::Intrinsic(kind) = key {
            return kind.type_id();
        }

        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARDS - 1);
        let lock = &self.shards[shard_idx];

        if let Some(&slot) = lock.read().expect("type shard lock poisoned").ids.get(&key) {
            return Self::make_id(shard_idx, slot);
        }

        let mut shard = lock.write().expect("type shard lock poisoned");
        // Another thread may have interned it between the two locks.
        if let Some(&slot) = shard.ids.get(&key) {
            return Self::make_id(shard_idx, slot);
        }
        let slot = shard.data.len() as u32;
        if slot > ((u32::MAX - TypeId::FIRST_USER) >> SHARD_BITS) {
            // Out of ids: degrade to `Any` instead of panicking
            return TypeId::ANY;
        }
        shard.data.push(key.clone());
        shard.ids.insert(key, slot);
        Self::make_id(shard_idx, slot)
    }

    /// Structure behind `id`, or `None` for an id this interner never issued.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        if id.is_intrinsic() {
            return IntrinsicKind::from_type_id(id).map(TypeData::Intrinsic);
        }

        let raw = id.0.checked_sub(TypeId::FIRST_USER)?;
        let shard_idx = (raw & (SHARDS as u32 - 1)) as usize;
        let slot = (raw >> SHARD_BITS) as usize;
        self.shards[shard_idx]
            .read()
            .expect("type shard lock poisoned")
            .data
            .get(slot)
            .cloned()
    }

    #[inline]
    fn make_id(shard_idx: usize, slot: u32) -> TypeId {
        TypeId(TypeId::FIRST_USER + ((slot << SHARD_BITS) | shard_idx as u32))
    }

    // -------------------------------------------------------------------------
    // Side tables
    // -------------------------------------------------------------------------

    pub fn intern_type_list(&self, items: &[TypeId]) -> TypeListId {
        let id = self
            .type_lists
            .write()
            .expect("type_lists lock poisoned")
            .intern(items, || Arc::from(items));
        TypeListId(id)
    }

    /// Members of a list; unknown ids read as the empty list.
    pub fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists
            .get(id.0)
            .or_else(|| lists.get(TypeListId::EMPTY.0))
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn union_shape(&self, id: UnionShapeId) -> Option<Arc<UnionShape>> {
        self.union_shapes
            .read()
            .expect("union_shapes lock poisoned")
            .get(id.0)
    }

    pub fn type_application(&self, id: TypeApplicationId) -> Option<Arc<TypeApplication>> {
        self.applications
            .read()
            .expect("applications lock poisoned")
            .get(id.0)
    }

    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    /// Bare textual placeholder, e.g. the annotation `"Node"`.
    pub fn placeholder(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeData::Placeholder(atom))
    }

    pub fn placeholder_atom(&self, name: Atom) -> TypeId {
        self.intern(TypeData::Placeholder(name))
    }

    /// Explicit forward-declaration wrapper, e.g. `ForwardRef("Node")`.
    pub fn forward_ref(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeData::ForwardRef(atom))
    }

    /// Type identity of a declared class or function.
    pub fn declared(&self, def_id: DefId) -> TypeId {
        self.intern(TypeData::Declared(def_id))
    }

    /// Type variable.
    pub fn type_param(&self, name: &str) -> TypeId {
        let atom = self.intern_string(name);
        self.intern(TypeData::TypeParam(atom))
    }

    /// Generic container applied to arguments, e.g. `List["Node"]`.
    pub fn application(&self, base: &str, args: &[TypeId]) -> TypeId {
        let base = self.intern_string(base);
        let args = self.intern_type_list(args);
        let id = self
            .applications
            .write()
            .expect("applications lock poisoned")
            .intern(&TypeApplication { base, args }, || {
                Arc::new(TypeApplication { base, args })
            });
        self.intern(TypeData::Application(TypeApplicationId(id)))
    }

    /// Build `Union[members...]`.
    ///
    /// Exact duplicates are dropped (first occurrence wins), nested unions are
    /// kept as members rather than flattened, and free type variables of the
    /// members are recorded as the composite's parameters. A single distinct
    /// member is returned as-is; no members yields `NEVER`.
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut distinct: TypeListBuffer = SmallVec::new();
        for member in members {
            if !distinct.contains(&member) {
                distinct.push(member);
            }
        }
        match distinct.len() {
            0 => return TypeId::NEVER,
            1 => return distinct[0],
            _ => {}
        }

        let parameters = self.collect_parameters(&distinct);
        self.union_with_shape(UnionShape {
            origin: self.union_atom,
            name: None,
            inst: true,
            parameters: self.intern_type_list(&parameters),
            members: self.intern_type_list(&distinct),
        })
    }

    /// Build `Optional[inner]`, a union with `None` that keeps its display name.
    pub fn optional(&self, inner: TypeId) -> TypeId {
        if inner == TypeId::NONE {
            return TypeId::NONE;
        }
        let members = [inner, TypeId::NONE];
        let parameters = self.collect_parameters(&members);
        self.union_with_shape(UnionShape {
            origin: self.union_atom,
            name: Some(self.optional_atom),
            inst: true,
            parameters: self.intern_type_list(&parameters),
            members: self.intern_type_list(&members),
        })
    }

    /// Intern a fully specified union shape without normalizing it.
    pub fn union_with_shape(&self, shape: UnionShape) -> TypeId {
        let id = self
            .union_shapes
            .write()
            .expect("union_shapes lock poisoned")
            .intern(&shape, || Arc::new(shape.clone()));
        self.intern(TypeData::Union(UnionShapeId(id)))
    }

    /// Type variables directly in `members`, plus those already recorded on
    /// nested unions. Order of first appearance.
    fn collect_parameters(&self, members: &[TypeId]) -> TypeListBuffer {
        let mut parameters: TypeListBuffer = SmallVec::new();
        for &member in members {
            match self.lookup(member) {
                Some(TypeData::TypeParam(_)) => {
                    if !parameters.contains(&member) {
                        parameters.push(member);
                    }
                }
                Some(TypeData::Union(shape_id)) => {
                    let Some(shape) = self.union_shape(shape_id) else {
                        continue;
                    };
                    for &param in self.type_list(shape.parameters).iter() {
                        if !parameters.contains(&param) {
                            parameters.push(param);
                        }
                    }
                }
                _ => {}
            }
        }
        parameters
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
