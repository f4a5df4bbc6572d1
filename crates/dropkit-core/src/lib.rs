#![forbid(unsafe_code)]

//! Core: geometry, element identity, and change notification.
//!
//! # Role in Dropkit
//! `dropkit-core` holds the vocabulary shared by every other crate: the
//! [`geometry::Rect`] / [`geometry::Offset`] primitives used for collision
//! testing, the opaque [`id::ElementId`], and the synchronous
//! [`reactive::Notifier`] that registries use to publish every mutation.
//!
//! # How it fits in the system
//! `dropkit-registry` stores rectangles keyed by `ElementId` and emits its
//! change events through a `Notifier`. `dropkit-widgets` subscribes to those
//! events to drive the draggable and droppable collaborators.

pub mod geometry;
pub mod id;
pub mod reactive;

pub use geometry::{Offset, Point, Rect};
pub use id::ElementId;
pub use reactive::{Notifier, Subscription};
