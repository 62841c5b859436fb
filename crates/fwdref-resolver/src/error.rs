//! Errors surfaced to callers.
//!
//! Resolution itself never fails: missing annotation sets, unknown names and
//! over-deep composites all degrade to "leave it as it is". The variants here
//! are caller mistakes at declaration or entry-point time.

use crate::def::DefId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The subject was never declared in this registry.
    UnknownDeclaration(DefId),
    /// The subject has no name, so it cannot be registered for self-reference.
    AnonymousDeclaration(DefId),
    /// A declaration named a base that does not exist.
    UnknownBase { declaration: DefId, base: DefId },
    /// The bases admit no consistent resolution order.
    InconsistentHierarchy { declaration: DefId },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::UnknownDeclaration(id) => {
                write!(f, "declaration {id} is not registered")
            }
            ResolveError::AnonymousDeclaration(id) => {
                write!(f, "declaration {id} has no name to register under")
            }
            ResolveError::UnknownBase { declaration, base } => {
                write!(f, "declaration {declaration} extends unknown base {base}")
            }
            ResolveError::InconsistentHierarchy { declaration } => write!(
                f,
                "cannot compute a consistent resolution order for declaration {declaration}"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
