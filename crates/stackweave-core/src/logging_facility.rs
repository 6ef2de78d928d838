//! Structured logging facility for stackweave
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use stackweave_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Lifecycle events belong to the boundary layer (`pipeline` and the CLI).
//! The template engine and the composer only emit `tracing::debug!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
