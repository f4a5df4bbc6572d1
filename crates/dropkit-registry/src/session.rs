#![forbid(unsafe_code)]

//! The single live drag session.
//!
//! # State Machine
//!
//! ```text
//! Idle --report_drag_offset--> Dragging --commit_drop (hit)--> Dropped
//!                                 |
//!                                 +------end_drag-----------> Idle
//! ```
//!
//! `Dropped` has no automatic way back to `Idle`: the dropped draggable is
//! retired by its owner. A new `report_drag_offset` starts a fresh session
//! and `clear()` resets everything.

use dropkit_core::{ElementId, Offset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Dropped,
}

/// The draggable currently (or most recently) driven by a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: ElementId,
    /// Delta from the draggable's registered origin.
    pub offset: Offset,
    pub phase: DragPhase,
}

impl DragSession {
    #[must_use]
    pub const fn dragging(id: ElementId, offset: Offset) -> Self {
        Self {
            id,
            offset,
            phase: DragPhase::Dragging,
        }
    }

    #[must_use]
    pub const fn dropped(id: ElementId, offset: Offset) -> Self {
        Self {
            id,
            offset,
            phase: DragPhase::Dropped,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }
}
