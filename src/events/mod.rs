//! Append-only event log
//!
//! Records entity CRUD, session lifecycle, and achievement notifications as
//! line-delimited JSON.

pub mod entry;
pub mod logger;

pub use entry::{EntityKind, EventEntry, EventKind};
pub use logger::EventLogger;
