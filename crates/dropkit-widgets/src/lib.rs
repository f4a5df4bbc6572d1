#![forbid(unsafe_code)]

//! Headless drag-and-drop collaborators for Dropkit.
//!
//! These types hold the view-side state that a rendering layer needs and
//! make the registry calls at the right points of the layout and gesture
//! lifecycle. They draw nothing: a view reads [`DragInfo`] / [`DropInfo`]
//! and [`Draggable::visual_offset`] each frame and renders accordingly.

pub mod container;
pub mod draggable;
pub mod droppable;

pub use container::DragDropContainer;
pub use draggable::{DragInfo, Draggable};
pub use droppable::{DropInfo, Droppable};
