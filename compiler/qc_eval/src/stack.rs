//! Native stack growth for recursive execution.
//!
//! Nested IF branches, function bodies and parenthesised expressions all
//! recurse on the native stack. Every recursion point goes through
//! [`ensure_sufficient_stack`], which grows the stack with `stacker` once
//! less than [`RED_ZONE`] bytes remain.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// `stacker` is unavailable on wasm; the runtime manages the stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
