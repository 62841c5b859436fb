//! Centralized limits and thresholds for forward-reference resolution.
//!
//! Resolution is a direct recursive walk over annotation values, so the only
//! unbounded resource is stack depth through nested composites. The limits
//! here keep a pathological annotation from overflowing the stack.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for resolving a single annotation value.
///
/// Each nested union adds one frame to the extractor/rewriter recursion.
/// Past this depth the remaining subtree is left as-is.
///
/// # Example
///
/// ```text
/// Union[A, Union[B, Union[C, Union[D, /* ... 64 levels ... */]]]]
/// ```
pub const MAX_HINT_DEPTH: u32 = 64;

/// Maximum number of ancestors accepted in one resolution order.
///
/// Linearization of a declaration whose chain is longer than this fails
/// with an inconsistent-hierarchy error.
pub const MAX_ANCESTOR_CHAIN: usize = 1024;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for composite member lists before spilling to the heap.
///
/// Most unions in annotations have two or three members (`Optional[T]` is
/// two), so eight covers nearly all of them without allocating.
pub const COMPOSITE_INLINE_MEMBERS: usize = 8;
