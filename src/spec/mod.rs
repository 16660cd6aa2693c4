//! # Spec Module
//!
//! Route metadata consumed by the router, binder and dispatcher.
//!
//! Route discovery itself is external: whoever scans controllers (or reads a
//! manifest) produces an ordered list of [`RouteTemplate`] values, one per
//! `(method, path template, handler)` triple, together with the
//! [`ParameterSpec`] table describing the handler's declared parameters.
//! Everything downstream is a data-driven loop over this schema; there is no
//! runtime introspection anywhere in the pipeline.
//!
//! Complex form-bound objects are described the same way: an [`ObjectSchema`]
//! declares an ordered field-name/semantic-type list under a schema name, and
//! a [`SchemaRegistry`] makes those schemas available to the binder.

mod types;

pub use types::{ObjectSchema, ParameterSpec, RouteTemplate, SchemaRegistry, SemanticType};
