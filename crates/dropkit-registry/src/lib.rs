#![forbid(unsafe_code)]

//! Registry: the drag/drop collision and registration engine.
//!
//! # Role in Dropkit
//! `dropkit-registry` owns the mutable state of one drag-and-drop scope:
//! the rectangles of every draggable and droppable, the single live drag
//! session, and the most recent drop outcome. It answers "is X colliding
//! with Y" and "where does X land" and publishes every mutation to
//! subscribers synchronously.
//!
//! # Primary responsibilities
//! - **Registration**: [`DragDropRegistry::register_draggable`] and
//!   [`DragDropRegistry::register_droppable`] upsert geometry.
//! - **Live tracking**: [`DragDropRegistry::report_drag_offset`] and
//!   [`DragDropRegistry::end_drag`] drive the [`DragSession`].
//! - **Resolution**: [`DragDropRegistry::can_drop`],
//!   [`DragDropRegistry::commit_drop`], and the two highlight queries.
//!
//! # How it fits in the system
//! Geometry and ids come from `dropkit-core`. The headless collaborators in
//! `dropkit-widgets` hold clones of one registry handle and call into it
//! from layout and gesture callbacks.

pub mod config;
pub mod event;
pub mod registry;
pub mod session;

pub use config::{ConfigError, OverlapPolicy, RegistryConfig};
pub use event::{DropBinding, DropTarget, RegistryEvent};
pub use registry::DragDropRegistry;
pub use session::{DragPhase, DragSession};
