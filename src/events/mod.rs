//! Notifications for renderers.
//!
//! The engine never calls out to a UI. It appends `GameEvent`s to an
//! `EventQueue` after each committed mutation and the transport layer
//! drains them.

mod event;
mod queue;

pub use event::GameEvent;
pub use queue::{EventQueue, MAX_PENDING_EVENTS};
