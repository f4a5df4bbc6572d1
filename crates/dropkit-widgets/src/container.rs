#![forbid(unsafe_code)]

//! Drag-and-drop scope.
//!
//! A [`DragDropContainer`] owns one [`DragDropRegistry`] and defines the
//! coordinate space every descendant registers in. It hands the registry to
//! its draggables and droppables explicitly through the factory methods;
//! nothing is looked up globally.
//!
//! Frames passed to `layout` are in the window's coordinate space. The
//! container subtracts its own origin so all registered rectangles are
//! relative to the container, and offsets compare across independently laid
//! out elements.

use dropkit_core::{ElementId, Point, Rect};
use dropkit_registry::{DragDropRegistry, RegistryConfig};

use crate::draggable::Draggable;
use crate::droppable::Droppable;

/// One drag-and-drop scope.
#[derive(Debug, Clone)]
pub struct DragDropContainer {
    registry: DragDropRegistry,
    origin: Point,
}

impl Default for DragDropContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl DragDropContainer {
    /// Scope at the window origin with the default registry policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: DragDropRegistry::with_config(config),
            origin: Point::ORIGIN,
        }
    }

    /// Place the scope's coordinate origin at `origin` (window space).
    #[must_use]
    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &DragDropRegistry {
        &self.registry
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Translate a window-space frame into this scope's coordinate space.
    #[must_use]
    pub fn to_local(&self, frame: Rect) -> Rect {
        frame.offset_by(-self.origin.offset_from(Point::ORIGIN))
    }

    /// Declare a draggable element in this scope.
    #[must_use]
    pub fn draggable(&self, id: ElementId) -> Draggable {
        Draggable::new(id, self.clone())
    }

    /// Declare a droppable element in this scope.
    ///
    /// With `accepts_any == false`, `id` is the id of the draggable this
    /// target is bound to.
    #[must_use]
    pub fn droppable(&self, id: ElementId, accepts_any: bool) -> Droppable {
        Droppable::new(id, accepts_any, self.clone())
    }

    /// Create an independent child scope at `origin` (window space).
    ///
    /// The child has its own registry with the same policy, so ids in the
    /// child never collide with ids in this scope.
    #[must_use]
    pub fn nested(&self, origin: Point) -> Self {
        Self::with_config(self.registry.config()).at(origin)
    }
}
