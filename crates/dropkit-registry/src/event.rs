#![forbid(unsafe_code)]

//! Binding modes, drop targets, and the change events a registry publishes.

use dropkit_core::{ElementId, Offset, Rect};

/// How a droppable decides which draggables it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropBinding {
    /// Bound to exactly one draggable. The droppable is keyed by that
    /// draggable's id and only its geometry is tested against it.
    Exclusive,
    /// Accepts any draggable whose geometry overlaps it. Keyed by the
    /// droppable's own id.
    Wildcard,
}

impl DropBinding {
    #[must_use]
    pub const fn from_accepts_any(accepts_any: bool) -> Self {
        if accepts_any {
            Self::Wildcard
        } else {
            Self::Exclusive
        }
    }

    #[must_use]
    pub const fn accepts_any(self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// Where a draggable lands.
///
/// The recorded drop outcome differs by binding mode: an exclusive landing is
/// addressed by the draggable's id, a wildcard landing by the droppable's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The draggable's own exclusive target. Carries the draggable id.
    Exclusive(ElementId),
    /// A wildcard droppable. Carries the droppable id.
    Wildcard(ElementId),
}

impl DropTarget {
    /// The id recorded as the drop outcome.
    #[must_use]
    pub const fn outcome_id(self) -> ElementId {
        match self {
            Self::Exclusive(id) | Self::Wildcard(id) => id,
        }
    }

    #[must_use]
    pub const fn binding(self) -> DropBinding {
        match self {
            Self::Exclusive(_) => DropBinding::Exclusive,
            Self::Wildcard(_) => DropBinding::Wildcard,
        }
    }
}

/// A mutation of registry state, delivered synchronously to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistryEvent {
    DraggableRegistered {
        id: ElementId,
        rect: Rect,
    },
    DroppableRegistered {
        id: ElementId,
        rect: Rect,
        binding: DropBinding,
        /// The id was previously registered under the other binding and
        /// that entry was purged.
        rebound: bool,
    },
    DraggableRemoved {
        id: ElementId,
    },
    DroppableRemoved {
        id: ElementId,
    },
    /// The session draggable moved (or a new session started).
    DragMoved {
        id: ElementId,
        offset: Offset,
    },
    /// A dragging session ended without a drop.
    DragEnded {
        id: ElementId,
    },
    /// A drop was committed; the drop outcome is now `target.outcome_id()`.
    Dropped {
        draggable: ElementId,
        target: DropTarget,
    },
    /// Every registration, the session, and the outcome were reset.
    Cleared,
}

impl RegistryEvent {
    /// The drop outcome id this event sets, if it is a drop.
    #[must_use]
    pub const fn drop_outcome(&self) -> Option<ElementId> {
        match self {
            Self::Dropped { target, .. } => Some(target.outcome_id()),
            _ => None,
        }
    }
}
