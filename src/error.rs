//! Error taxonomy for the routing pipeline.
//!
//! Only two of these ever cross a public boundary: [`RegisterError`] is
//! startup-fatal, and [`DispatchError`] is what the dispatcher hands the
//! transport when a request cannot produce a normal result. [`CoercionError`]
//! is absorbed inside the binder, which degrades the offending parameter to
//! its type's default value instead of failing the request.

use crate::spec::SemanticType;
use http::Method;
use thiserror::Error;

/// Startup-time route registration failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The same `(method, path template)` pair was registered twice.
    #[error("duplicate route: {method} {path_pattern} is already registered")]
    DuplicateRoute { method: Method, path_pattern: String },
    /// A template reuses a placeholder name, e.g. `/a/{id}/b/{id}`.
    #[error("duplicate placeholder {{{name}}} in template {path_pattern}")]
    DuplicatePlaceholder { path_pattern: String, name: String },
}

/// A raw string could not be converted to the requested semantic type.
///
/// Recoverable by construction: the binder never lets this bubble past it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot coerce {value:?} into {target}")]
pub struct CoercionError {
    /// The offending raw input.
    pub value: String,
    /// The requested target type.
    pub target: SemanticType,
}

impl CoercionError {
    #[must_use]
    pub fn new(value: impl Into<String>, target: SemanticType) -> Self {
        Self {
            value: value.into(),
            target,
        }
    }
}

/// Request-level failure translated to an HTTP status by the dispatcher.
///
/// Routing mismatches are structural outcomes, not raised errors; they are
/// still modeled here because the transport consumes them the same way it
/// consumes a handler failure: status code plus error document.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route, literal or templated, covers the path.
    #[error("unknown route: {path}")]
    NotFound { path: String },
    /// Some template covers the path but none with the request's method.
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        /// Methods registered for this path, for the `Allow` header.
        allowed: Vec<Method>,
    },
    /// The invoked handler returned an error or panicked.
    #[error("handler error: {message}")]
    Handler { message: String },
}

impl DispatchError {
    /// HTTP status code this failure translates to.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::NotFound { .. } => 404,
            DispatchError::MethodNotAllowed { .. } => 405,
            DispatchError::Handler { .. } => 500,
        }
    }

    /// Value for the `Allow` response header, comma-separated; present only
    /// for method mismatches.
    #[must_use]
    pub fn allow_header(&self) -> Option<String> {
        match self {
            DispatchError::MethodNotAllowed { allowed, .. } => Some(
                allowed
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }

    /// Small HTML error document carrying the status code and message, the
    /// shape the transport writes for failed requests.
    #[must_use]
    pub fn html_document(&self) -> String {
        let code = self.status();
        format!(
            "<!DOCTYPE html><html><head><title>Error {code}</title></head>\
             <body><h1>Error {code}</h1><p>{self}</p></body></html>"
        )
    }
}
