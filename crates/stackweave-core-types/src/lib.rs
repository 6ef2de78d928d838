//! Core types shared across stackweave facilities
//!
//! This crate holds the canonical field keys and event names used by the
//! logging facility and by error reporting, so every crate emits the same
//! structured shape.

pub mod schema;
