//! # Routier
//!
//! **Routier** is a minimal HTTP request router and dispatcher: given a set
//! of registered routes (method, path template, handler), it matches an
//! incoming request to exactly one handler, binds typed arguments from the
//! path, query/form values and multipart payload, invokes the handler, and
//! converts its return value into a response action — an HTML body, a
//! redirect, a view forward, or a JSON body.
//!
//! ## Architecture
//!
//! - **[`spec`]** - route metadata: templates, parameter tables, object schemas
//! - **[`router`]** - route registration and method + path matching
//! - **[`coerce`]** - string-to-typed-value coercion with total defaults
//! - **[`binder`]** - argument binding for matched routes
//! - **[`render`]** - handler result to response action mapping
//! - **[`dispatcher`]** - orchestration and HTTP failure translation
//! - **[`request`]** - the per-request input record supplied by the transport
//!
//! Transport concerns (sockets, TLS, multipart decoding, static resources,
//! view-template execution) are external: the transport feeds one
//! [`request::RequestView`] per request and executes the returned
//! [`render::DispatchResult`].
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use routier::dispatcher::Dispatcher;
//! use routier::render::{DispatchResult, HandlerResult};
//! use routier::request::RequestView;
//! use routier::router::RouteTable;
//! use routier::spec::{ParameterSpec, RouteTemplate, SemanticType};
//!
//! let mut table = RouteTable::new();
//! table
//!     .register(
//!         RouteTemplate::new(Method::GET, "/hello/{name}", "hello")
//!             .with_parameters(vec![ParameterSpec::new("name", SemanticType::Str)]),
//!     )
//!     .unwrap();
//!
//! let mut dispatcher = Dispatcher::new(table);
//! dispatcher.register_handler("hello", |args| {
//!     let name = args[0].as_str().unwrap_or_default();
//!     Ok(HandlerResult::Text(format!("<p>Hello {name}</p>")))
//! });
//!
//! let result = dispatcher
//!     .dispatch(RequestView::new(Method::GET, "/hello/world"))
//!     .unwrap();
//! assert_eq!(
//!     result,
//!     DispatchResult::TextBody {
//!         content_type: "text/html".to_string(),
//!         text: "<p>Hello world</p>".to_string(),
//!     }
//! );
//! ```

pub mod binder;
pub mod coerce;
pub mod dispatcher;
pub mod error;
pub mod render;
pub mod request;
pub mod router;
pub mod spec;

pub use binder::bind;
pub use coerce::{coerce, default_for, BoundValue};
pub use dispatcher::Dispatcher;
pub use error::{CoercionError, DispatchError, RegisterError};
pub use render::{render, DispatchResult, HandlerResult, ViewModel};
pub use request::{RequestView, UploadedPart};
pub use router::{RouteLookup, RouteMatch, RouteTable};
pub use spec::{ObjectSchema, ParameterSpec, RouteTemplate, SchemaRegistry, SemanticType};
