//! Toggle-region template engine
//!
//! Rewrites a text document by enabling or disabling marker-delimited
//! optional blocks, then substitutes flat `key -> value` placeholders.
//! This is deliberately not a templating language: no loops, no expressions,
//! no nested scopes.
//!
//! ```
//! use stackweave_core::template::{render_default, Document, MarkerPair, ParameterMap, ToggleDirective};
//!
//! let doc = Document::from("jobs:\n{{ start enableJavaMonJob }}  - java\n{{ stop enableJavaMonJob }}region: {{awsRegion}}\n");
//! let directives = [ToggleDirective::remove(MarkerPair::named("enableJavaMonJob"))];
//! let params = ParameterMap::new().with("awsRegion", "us-west-2");
//!
//! let out = render_default(&doc, &directives, &params).unwrap();
//! assert_eq!(out.as_str(), "jobs:\nregion: us-west-2\n");
//! ```

pub mod engine;
pub mod model;
pub mod substitute;

pub use engine::{apply_toggles, find_regions, render, render_default, toggle};
pub use model::{
    Document, MarkerPair, ParameterMap, PlaceholderSyntax, Region, ToggleDirective,
};
pub use substitute::{check_params, substitute};
