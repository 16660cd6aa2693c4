//! # Dispatcher Module
//!
//! Per-request orchestration of the match → bind → invoke → render pipeline.
//!
//! ## Request Flow
//!
//! 1. The route table matches the incoming method + path.
//! 2. The binder produces the handler's argument list from the match and the
//!    request record.
//! 3. The named handler is invoked; panics are caught and converted to
//!    handler errors.
//! 4. The renderer maps the handler's result onto a response action.
//!
//! ## Error Translation
//!
//! The dispatcher owns the mapping of structural outcomes and failures to
//! HTTP statuses: no route at all is 404; a path covered only under other
//! methods is 405 carrying the allowed methods; a handler failure or panic
//! is 500 with the failure message. Binding and rendering never fail a
//! request — coercion degrades to defaults and every result shape renders.

mod core;

pub use core::{Dispatcher, Handler};
