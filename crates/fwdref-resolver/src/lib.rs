//! Forward-Reference Resolver
//!
//! Declarations are registered first, with any type that did not exist yet
//! written as a textual placeholder. Resolution then rewrites every
//! placeholder whose name is bound in a symbol table into the bound type
//! identity, across a declaration's whole resolution order and through
//! nested unions.
//!
//! ```ignore
//! let registry = TypeRegistry::new();
//! let interner = registry.interner();
//!
//! let next = registry.atom("next");
//! let node = registry.declare(
//!     Declaration::class(registry.atom("Node"))
//!         .with_field(next, interner.optional(interner.placeholder("Node"))),
//! )?;
//!
//! resolve(&registry, node)?;
//! // Node.next is now Optional[Node]
//! ```
//!
//! Pieces, leaves first:
//! - [`SymbolTable`]: name → type identity
//! - [`TypeHintResolver`]: placeholder extraction and composite rewriting
//! - [`resolve_annotation_set`]: one annotation set in place
//! - [`walk_hierarchy`]: every owned set of every ancestor
//! - [`resolve`], [`resolver`], [`resolve_all`]: entry points
pub mod annotations;
pub mod def;
pub mod entry;
pub mod error;
pub mod extract;
pub mod format;
pub mod intern;
pub mod mro;
pub mod options;
pub mod pending;
pub mod recursion;
pub mod registry;
pub mod symbols;
pub mod types;
pub mod walk;

pub use annotations::{AnnotationSet, resolve_annotation_set};
pub use def::{DeclKind, Declaration, DeclarationStore, DefId, Member, MemberKind};
pub use entry::{resolve, resolve_all, resolve_all_with, resolve_with, resolver};
pub use error::ResolveError;
pub use extract::{ResolveStats, TypeHintResolver};
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use options::ResolveOptions;
pub use pending::pending_references;
pub use registry::TypeRegistry;
pub use symbols::SymbolTable;
pub use types::{
    IntrinsicKind, TypeApplication, TypeApplicationId, TypeData, TypeId, TypeListId, UnionShape,
    UnionShapeId,
};
pub use walk::{resolve_own_annotations, walk_hierarchy};

// Cross-module scenarios; per-module tests are loaded by their source files.
#[cfg(test)]
#[path = "../tests/integration_tests.rs"]
mod integration_tests;
