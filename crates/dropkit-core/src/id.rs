#![forbid(unsafe_code)]

//! Opaque element identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a draggable or droppable element.
///
/// Ids only need to be unique within one registry. [`ElementId::fresh`]
/// hands out process-wide unique values; [`ElementId::from_raw`] lets callers
/// reuse ids they already own (database keys, list indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a caller-chosen raw value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate a new id, unique for the lifetime of the process.
    ///
    /// Fresh ids start at `1 << 48` so they never collide with small
    /// caller-chosen raw ids.
    #[must_use]
    pub fn fresh() -> Self {
        Self((1 << 48) + NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
