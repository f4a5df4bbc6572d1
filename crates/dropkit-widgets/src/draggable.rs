#![forbid(unsafe_code)]

//! Headless draggable element.
//!
//! [`Draggable`] carries the view-side state of one draggable (visual
//! offset, dragging and dropped flags) and makes the registry calls a
//! gesture-driven view needs:
//!
//! | View callback     | Registry calls                                   |
//! |-------------------|--------------------------------------------------|
//! | first layout      | `register_draggable`                             |
//! | gesture move      | `report_drag_offset`                             |
//! | gesture end       | `can_drop`, then `commit_drop` on a hit; `end_drag_for` |
//! | gesture cancel    | `end_drag_for`                                   |
//!
//! On a hit the element is considered dropped and hidden; it does not
//! respond to further gestures. On a miss it springs back to its origin.
//! Ending or cancelling only ends the registry session if it still belongs
//! to this element, so a late end never cuts off another element's drag.

use dropkit_core::{ElementId, Offset, Rect};
use tracing::debug;

use crate::container::DragDropContainer;

/// Snapshot handed to the view's content builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragInfo {
    pub did_drop: bool,
    pub is_dragging: bool,
    /// The element is being dragged over a target it can drop on.
    pub is_colliding: bool,
}

type DragEndedAction = Box<dyn FnMut(bool)>;

/// View-side state for one draggable element.
pub struct Draggable {
    id: ElementId,
    scope: DragDropContainer,
    offset: Offset,
    is_dragging: bool,
    is_dropped: bool,
    on_drag_ended: Option<DragEndedAction>,
}

impl std::fmt::Debug for Draggable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draggable")
            .field("id", &self.id)
            .field("offset", &self.offset)
            .field("is_dragging", &self.is_dragging)
            .field("is_dropped", &self.is_dropped)
            .finish_non_exhaustive()
    }
}

impl Draggable {
    pub(crate) fn new(id: ElementId, scope: DragDropContainer) -> Self {
        Self {
            id,
            scope,
            offset: Offset::ZERO,
            is_dragging: false,
            is_dropped: false,
            on_drag_ended: None,
        }
    }

    /// Called after every gesture with `true` if it ended in a drop.
    #[must_use]
    pub fn on_drag_ended(mut self, action: impl FnMut(bool) + 'static) -> Self {
        self.on_drag_ended = Some(Box::new(action));
        self
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Register (or refresh) the element's window-space frame.
    pub fn layout(&self, frame: Rect) {
        self.scope
            .registry()
            .register_draggable(self.id, self.scope.to_local(frame));
    }

    /// Gesture moved; `translation` is the delta from the gesture start.
    pub fn drag_changed(&mut self, translation: Offset) {
        if self.is_dropped {
            return;
        }
        self.offset = translation;
        self.is_dragging = true;
        self.scope
            .registry()
            .report_drag_offset(self.id, translation);
    }

    /// Gesture ended at `translation`. Returns `true` if the element was
    /// dropped on a target.
    pub fn drag_ended(&mut self, translation: Offset) -> bool {
        if self.is_dropped {
            return false;
        }
        let registry = self.scope.registry();
        let dropped = registry.can_drop(self.id, translation)
            && registry.commit_drop(self.id, translation).is_some();

        if dropped {
            self.is_dropped = true;
            self.offset = translation;
        } else {
            self.offset = Offset::ZERO;
        }
        self.is_dragging = false;
        registry.end_drag_for(self.id);
        debug!(id = %self.id, dropped, "drag gesture ended");
        self.fire_drag_ended(dropped);
        dropped
    }

    /// Gesture cancelled (focus loss, escape). Springs back without a drop.
    pub fn cancel(&mut self) {
        if self.is_dropped || !self.is_dragging {
            return;
        }
        self.offset = Offset::ZERO;
        self.is_dragging = false;
        self.scope.registry().end_drag_for(self.id);
        self.fire_drag_ended(false);
    }

    #[must_use]
    pub fn info(&self) -> DragInfo {
        if self.is_dropped {
            return DragInfo {
                did_drop: true,
                is_dragging: false,
                is_colliding: false,
            };
        }
        DragInfo {
            did_drop: false,
            is_dragging: self.is_dragging,
            is_colliding: self.scope.registry().is_colliding_as_drag(self.id),
        }
    }

    /// Where the view should draw the element relative to its layout frame.
    #[must_use]
    pub fn visual_offset(&self) -> Offset {
        self.offset
    }

    /// A dropped element is no longer drawn.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.is_dropped
    }

    /// Remove the element from the scope's registry.
    pub fn unmount(self) {
        self.scope.registry().remove_draggable(self.id);
    }

    fn fire_drag_ended(&mut self, dropped: bool) {
        if let Some(action) = self.on_drag_ended.as_mut() {
            action(dropped);
        }
    }
}
