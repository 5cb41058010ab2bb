//! Stable identities for events and event lists.
//!
//! Ids come from one process-wide monotonic counter and are never reused,
//! so an id recorded before an event was deleted can never alias a newer
//! event. This is what lets search results hold "weak" references: they
//! store ids, and resolving an id that no longer exists simply fails.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of one event.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

impl EventId {
    /// Allocate a fresh, never-before-seen id.
    pub fn fresh() -> Self {
        EventId(next_id())
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

/// Identity of one event list (a root list or some event's sub-events).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListId(u64);

impl ListId {
    /// Allocate a fresh, never-before-seen id.
    pub fn fresh() -> Self {
        ListId(next_id())
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListId({})", self.0)
    }
}
