//! Depth guard for recursion through nested composites.
//!
//! Placeholders are resolved by a direct recursive walk: a union member that
//! is itself a union goes back through the extractor. `DepthCounter` bounds
//! that nesting so a pathological hint cannot overflow the stack.
//!
//! # Safety
//!
//! - **Debug leak detection**: dropping a counter with depth > 0 panics in
//!   debug builds, catching a forgotten `leave()`.
//! - **Debug underflow detection**: `leave()` at depth 0 panics in debug builds.

/// Depth-only recursion guard.
///
/// Unlike a visiting-set guard it does not detect cycles; interned hints are
/// trees, so the same shape legitimately appears at several depths.
///
/// # Usage
///
/// ```ignore
/// if !counter.enter() {
///     return hint; // too deep, leave it as-is
/// }
/// let result = rewrite(hint);
/// counter.leave();
/// result
/// ```
#[derive(Debug)]
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
    exceeded: bool,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
            exceeded: false,
        }
    }

    /// Try to enter a deeper level.
    ///
    /// Returns `false` once the limit is reached; the `exceeded` flag is set
    /// and the depth is not incremented, so do not call `leave()` then.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave the current depth level.
    ///
    /// Must be called exactly once after every successful [`enter`](Self::enter).
    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "DepthCounter::leave() called at depth 0 without a matching enter()."
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Sticky: stays `true` until [`reset`](Self::reset).
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }

    pub fn reset(&mut self) {
        self.depth = 0;
        self.exceeded = false;
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!(
                "DepthCounter dropped at depth {}. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.depth,
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
