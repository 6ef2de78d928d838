//! stackweave core - template rendering and addon composition
//!
//! This crate provides:
//! - The toggle-region template engine (marker-pair toggling and flat
//!   placeholder substitution)
//! - The addon composition pipeline (stable topological ordering into a
//!   deployment descriptor)
//! - Plan file parsing and validation
//! - The error and logging facilities shared by the workspace
//!
//! Every operation is a synchronous pure function over immutable inputs.
//! Reading templates, resolving settings from the environment and handing the
//! descriptor to a deployer are left to the caller.

pub mod compose;
pub mod errors;
pub mod logging_facility;
pub mod pipeline;
pub mod plan;
pub mod template;

// Used by the logging macros
pub use stackweave_core_types as core_types;

// Re-export commonly used types
pub use compose::{compose, AddonPayload, AddonUnit, DeploymentDescriptor, GlobalSettings, OrderingHint};
pub use errors::{ExError, ExErrorKind, Result, StackError};
pub use plan::{parse_plan_str, Plan};
pub use template::{render, Document, MarkerPair, ParameterMap, PlaceholderSyntax, ToggleDirective};
