//! # Router Module
//!
//! Route registration and request matching.
//!
//! ## Overview
//!
//! The route table is built once at startup from discovery output and never
//! mutated afterwards:
//!
//! 1. **Registration**: each [`RouteTemplate`](crate::spec::RouteTemplate) is
//!    compiled into either an exact entry (no placeholders) or a segment list
//!    with `{name}` capture slots.
//! 2. **Matching**: a request first tries the O(1) exact lookup on the
//!    literal `(method, path)` pair, then scans templated routes in
//!    registration order with segment-wise matching.
//!
//! ## Precedence
//!
//! First-registered-wins is a design decision, not an optimization: it
//! resolves overlapping patterns (`/item/{id}` vs `/item/new`) without
//! priority metadata — discovery order encodes precedence, uniformly across
//! literal and templated routes. The exact map stays an O(1) fast path
//! because an exact hit only has to re-check templates registered before it.
//!
//! ## Path normalization
//!
//! An empty path normalizes to `/`. A trailing slash is a distinct segment:
//! `/item` and `/item/` are different paths and never match each other's
//! routes. No auto-trimming is performed.

mod core;

pub use core::{RouteLookup, RouteMatch, RouteTable, ParamVec, MAX_INLINE_PARAMS};
