//! Per-hint resolution: placeholder extraction and composite rewriting.
//!
//! `TypeHintResolver` answers one question for one annotation value: what is
//! its resolved form under the current symbol table?
//!
//! | Input | Result |
//! |-------|--------|
//! | `Placeholder(name)` | table binding, else unchanged |
//! | `ForwardRef(name)` | table binding, else `Placeholder(name)` |
//! | `Union(shape)` | new union, each member resolved, metadata kept |
//! | anything else | unchanged |
//!
//! Nothing here fails. Unknown names stay textual and composites nested past
//! the depth limit are returned as they are.

use crate::intern::{TypeInterner, TypeListBuffer};
use crate::recursion::DepthCounter;
use crate::symbols::SymbolTable;
use crate::types::{TypeData, TypeId, UnionShape, UnionShapeId};
use fwdref_common::interner::Atom;
use fwdref_common::limits::MAX_HINT_DEPTH;
use tracing::{trace, warn};

/// Counts gathered while resolving, for logging.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Placeholders replaced by a table binding.
    pub resolved: u32,
    /// Placeholders whose name was not in the table.
    pub unresolved: u32,
    /// Composites rebuilt with at least one changed member.
    pub composites_rebuilt: u32,
}

pub struct TypeHintResolver<'a> {
    interner: &'a TypeInterner,
    table: &'a SymbolTable,
    depth: DepthCounter,
    stats: ResolveStats,
}

impl<'a> TypeHintResolver<'a> {
    pub fn new(interner: &'a TypeInterner, table: &'a SymbolTable) -> Self {
        Self::with_max_depth(interner, table, MAX_HINT_DEPTH)
    }

    pub fn with_max_depth(
        interner: &'a TypeInterner,
        table: &'a SymbolTable,
        max_depth: u32,
    ) -> Self {
        Self {
            interner,
            table,
            depth: DepthCounter::new(max_depth),
            stats: ResolveStats::default(),
        }
    }

    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    /// Whether some composite was cut off by the depth limit.
    pub fn depth_exceeded(&self) -> bool {
        self.depth.is_exceeded()
    }

    /// Resolve one annotation value.
    pub fn resolve_hint(&mut self, hint: TypeId) -> TypeId {
        match self.interner.lookup(hint) {
            Some(TypeData::Placeholder(name)) => self.lookup_name(name).unwrap_or(hint),
            // The wrapper never survives: bound or not, only the text is kept.
            Some(TypeData::ForwardRef(name)) => self
                .lookup_name(name)
                .unwrap_or_else(|| self.interner.placeholder_atom(name)),
            Some(TypeData::Union(shape_id)) => self.rewrite_composite(hint, shape_id),
            _ => hint,
        }
    }

    fn lookup_name(&mut self, name: Atom) -> Option<TypeId> {
        match self.table.get(name) {
            Some(ty) => {
                self.stats.resolved += 1;
                trace!(name = name.0, to = ty.0, "placeholder resolved");
                Some(ty)
            }
            None => {
                self.stats.unresolved += 1;
                trace!(name = name.0, "placeholder left unresolved");
                None
            }
        }
    }

    /// Rebuild the union behind `hint` with every member resolved.
    ///
    /// The interned shape is never touched; a new shape carrying the same
    /// origin, name, instantiation flag and parameters is interned instead.
    /// Returns `hint` itself when no member changed.
    pub fn rewrite_composite(&mut self, hint: TypeId, shape_id: UnionShapeId) -> TypeId {
        let Some(shape) = self.interner.union_shape(shape_id) else {
            return hint;
        };
        if !self.depth.enter() {
            warn!(
                hint = hint.0,
                max_depth = self.depth.max_depth(),
                "composite nested too deeply, leaving it unresolved"
            );
            return hint;
        }

        let members = self.interner.type_list(shape.members);
        let resolved: TypeListBuffer = members
            .iter()
            .map(|&member| self.resolve_hint(member))
            .collect();
        self.depth.leave();

        if resolved.as_slice() == &*members {
            return hint;
        }

        self.stats.composites_rebuilt += 1;
        self.interner.union_with_shape(UnionShape {
            members: self.interner.intern_type_list(&resolved),
            ..(*shape).clone()
        })
    }
}

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod tests;
