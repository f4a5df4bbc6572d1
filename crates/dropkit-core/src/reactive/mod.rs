#![forbid(unsafe_code)]

//! Change notification primitives.

pub mod notifier;

pub use notifier::{Notifier, Subscription};
