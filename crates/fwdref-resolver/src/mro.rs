//! Resolution order (C3 linearization) of class declarations.
//!
//! The walker visits ancestors in this order. A class always comes before its
//! bases, bases keep their declared left-to-right order, and a shared
//! ancestor appears once, after every class that derives from it.

use crate::def::DefId;
use crate::error::ResolveError;
use fwdref_common::limits::MAX_ANCESTOR_CHAIN;

/// Linearize `id` given its direct `bases`.
///
/// `base_mro` returns the already-computed order of a base (self first).
/// Fails with [`ResolveError::InconsistentHierarchy`] when no order satisfies
/// every base's own order, or when the chain exceeds
/// [`MAX_ANCESTOR_CHAIN`].
pub fn linearize(
    id: DefId,
    bases: &[DefId],
    base_mro: impl Fn(DefId) -> Option<Vec<DefId>>,
) -> Result<Vec<DefId>, ResolveError> {
    let mut sequences: Vec<Vec<DefId>> = Vec::with_capacity(bases.len() + 1);
    for &base in bases {
        let order = base_mro(base).unwrap_or_else(|| vec![base]);
        sequences.push(order);
    }
    sequences.push(bases.to_vec());

    let mut result = vec![id];
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(result);
        }
        if result.len() > MAX_ANCESTOR_CHAIN {
            return Err(ResolveError::InconsistentHierarchy { declaration: id });
        }

        let candidate = sequences
            .iter()
            .map(|seq| seq[0])
            .find(|head| !sequences.iter().any(|seq| seq[1..].contains(head)));

        let Some(next) = candidate else {
            return Err(ResolveError::InconsistentHierarchy { declaration: id });
        };

        result.push(next);
        for seq in &mut sequences {
            if seq[0] == next {
                seq.remove(0);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/mro_tests.rs"]
mod tests;
