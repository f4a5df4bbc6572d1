#![forbid(unsafe_code)]

//! Dropkit public facade crate.
//!
//! Re-exports the engine and collaborator types from the internal crates
//! and offers a prelude for day-to-day usage.
//!
//! ```
//! use dropkit::prelude::*;
//!
//! let scope = DragDropContainer::new();
//! let card = ElementId::fresh();
//!
//! let mut drag = scope.draggable(card);
//! drag.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let slot = scope.droppable(card, false);
//! slot.layout(Rect::new(150.0, 0.0, 100.0, 100.0));
//!
//! drag.drag_changed(Offset::new(80.0, 0.0));
//! assert!(drag.info().is_colliding);
//! assert!(drag.drag_ended(Offset::new(80.0, 0.0)));
//! assert!(slot.info().did_drop);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use dropkit_core::{ElementId, Notifier, Offset, Point, Rect, Subscription};

// --- Registry re-exports ---------------------------------------------------

pub use dropkit_registry::{
    DragDropRegistry, DragPhase, DragSession, DropBinding, DropTarget, OverlapPolicy,
    RegistryConfig, RegistryEvent,
};

// --- Widget re-exports -----------------------------------------------------

#[cfg(feature = "widgets")]
pub use dropkit_widgets::{DragDropContainer, DragInfo, Draggable, DropInfo, Droppable};

// --- Errors ---------------------------------------------------------------

/// Top-level error type. The engine itself never fails; only configuration
/// loading does.
pub type Error = dropkit_registry::ConfigError;

/// Standard result type for Dropkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a registry policy from a `.toml` or `.json` file, chosen by
/// extension (TOML when the extension is missing or unknown).
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<RegistryConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => RegistryConfig::from_json_file(path),
        _ => RegistryConfig::from_toml_file(path),
    }
}

pub mod prelude {
    pub use crate::{
        DragDropRegistry, DragPhase, DropBinding, DropTarget, ElementId, Error, Offset, Point,
        Rect, RegistryConfig, RegistryEvent, Result,
    };

    #[cfg(feature = "widgets")]
    pub use crate::{DragDropContainer, DragInfo, Draggable, DropInfo, Droppable};

    pub use crate::{core, registry};

    #[cfg(feature = "widgets")]
    pub use crate::widgets;
}

pub use dropkit_core as core;
pub use dropkit_registry as registry;
#[cfg(feature = "widgets")]
pub use dropkit_widgets as widgets;
