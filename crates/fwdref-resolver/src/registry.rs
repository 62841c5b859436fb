//! The state one resolution session works against.
//!
//! A `TypeRegistry` owns the type interner, the declaration store, and the
//! default namespace: the table placeholders are resolved against when the
//! caller does not pass one. The namespace plays the role of the declaring
//! module's globals. It only grows, and it outlives any single call.
//!
//! Most callers build their own registry. [`TypeRegistry::global`] exists for
//! callers that want one implicit, process-wide namespace, with the usual
//! caveat that everything registered there stays registered.

use crate::def::{DeclarationStore, Declaration, DefId};
use crate::error::ResolveError;
use crate::format::TypeFormatter;
use crate::intern::TypeInterner;
use crate::options::ResolveOptions;
use crate::symbols::SymbolTable;
use crate::types::{IntrinsicKind, TypeId};
use fwdref_common::interner::Atom;
use once_cell::sync::Lazy;
use std::sync::RwLock;
use tracing::debug;

static GLOBAL_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::new);

pub struct TypeRegistry {
    interner: TypeInterner,
    declarations: DeclarationStore,
    namespace: RwLock<SymbolTable>,
    options: ResolveOptions,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry whose namespace already binds the builtin names.
    pub fn new() -> Self {
        Self::with_options(ResolveOptions::default())
    }

    pub fn with_options(options: ResolveOptions) -> Self {
        let interner = TypeInterner::new();
        let namespace: SymbolTable = IntrinsicKind::ALL
            .iter()
            .map(|kind| (interner.intern_string(kind.name()), kind.type_id()))
            .collect();

        Self {
            interner,
            declarations: DeclarationStore::new(),
            namespace: RwLock::new(namespace),
            options,
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn declarations(&self) -> &DeclarationStore {
        &self.declarations
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    pub fn atom(&self, name: &str) -> Atom {
        self.interner.intern_string(name)
    }

    /// Declare a class or function (phase one).
    ///
    /// Declaring does not bind the name in the namespace; that happens when
    /// the declaration is resolved, or explicitly through [`bind`](Self::bind).
    pub fn declare(&self, declaration: Declaration) -> Result<DefId, ResolveError> {
        self.declarations.declare(declaration)
    }

    /// The type identity placeholders naming `def_id` resolve to.
    pub fn identity(&self, def_id: DefId) -> TypeId {
        self.interner.declared(def_id)
    }

    /// Bind `name` in the default namespace; the later binding wins.
    pub fn bind(&self, name: &str, ty: TypeId) -> Option<TypeId> {
        let name = self.atom(name);
        debug!(name = name.0, ty = ty.0, "bind in namespace");
        self.namespace
            .write()
            .expect("namespace lock poisoned")
            .insert(name, ty)
    }

    /// Current binding of `name` in the default namespace.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        let name = self.interner.string_interner.get(name)?;
        self.namespace
            .read()
            .expect("namespace lock poisoned")
            .get(name)
    }

    /// Copy of the default namespace, e.g. to seed a private table.
    pub fn namespace_snapshot(&self) -> SymbolTable {
        self.namespace
            .read()
            .expect("namespace lock poisoned")
            .clone()
    }

    pub(crate) fn namespace(&self) -> &RwLock<SymbolTable> {
        &self.namespace
    }

    pub fn formatter(&self) -> TypeFormatter<'_> {
        TypeFormatter::new(&self.interner).with_declarations(&self.declarations)
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
