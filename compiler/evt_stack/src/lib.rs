//! Stack growth for deep, user-controlled recursion.
//!
//! Event sheets nest sub-events inside sub-events, compound conditions nest
//! sub-instructions, and expressions nest arguments inside arguments. None
//! of those depths is bounded by this engine, so every recursive step of a
//! walk goes through [`ensure_sufficient_stack`].
//!
//! - **Native targets**: the `stacker` crate grows the stack on demand.
//! - **WASM targets**: plain call (the runtime manages its own stack).

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn walk(events: &mut EventList<E>) {
///     for event in events {
///         // ...
///         if let Some(sub) = event.sub_events_mut() {
///             ensure_sufficient_stack(|| walk(sub));
///         }
///     }
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
