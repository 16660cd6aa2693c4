//! Dispatcher core - per-request orchestration and failure translation.

use crate::binder::bind;
use crate::coerce::BoundValue;
use crate::error::DispatchError;
use crate::render::{render_for_route, DispatchResult, HandlerResult};
use crate::request::RequestView;
use crate::router::{RouteLookup, RouteTable};
use crate::spec::{ObjectSchema, SchemaRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A registered handler: receives the bound argument list, returns a result
/// shape or an opaque failure.
pub type Handler = Arc<dyn Fn(&[BoundValue]) -> anyhow::Result<HandlerResult> + Send + Sync>;

/// Request dispatcher over an immutable route table.
///
/// Built once at startup (table, schemas, handlers), then shared by
/// reference across request handlers. `dispatch` takes `&self` and keeps all
/// per-request state on the caller's stack, so concurrent requests need no
/// synchronization.
#[derive(Clone, Default)]
pub struct Dispatcher {
    table: RouteTable,
    schemas: SchemaRegistry,
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            schemas: SchemaRegistry::new(),
            handlers: HashMap::new(),
        }
    }

    /// The routing table this dispatcher serves.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Register an object schema for form-bound parameters.
    pub fn register_schema(&mut self, schema: ObjectSchema) {
        self.schemas.register(schema);
    }

    /// Register a handler under a name referenced by route templates.
    ///
    /// Registering the same name twice replaces the previous handler.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[BoundValue]) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            warn!(handler_name = %name, "Replaced existing handler");
        } else {
            debug!(handler_name = %name, total_handlers = self.handlers.len(), "Handler registered");
        }
    }

    /// Serve one request: match, bind, invoke, render.
    ///
    /// The request is consumed because uploaded parts are moved out of it
    /// into the bound argument list.
    pub fn dispatch(&self, mut request: RequestView) -> Result<DispatchResult, DispatchError> {
        let method = request.method.clone();
        let path = request.path.clone();
        debug!(method = %method, path = %path, "Dispatch start");

        let route_match = match self.table.lookup(&method, &path) {
            RouteLookup::Matched(m) => m,
            RouteLookup::MethodMismatch(allowed) => {
                return Err(DispatchError::MethodNotAllowed {
                    method,
                    path,
                    allowed,
                });
            }
            RouteLookup::NoRoute => return Err(DispatchError::NotFound { path }),
        };

        let args = bind(&route_match, &mut request, &self.schemas);

        let handler_name = route_match.route.handler_name.as_str();
        let Some(handler) = self.handlers.get(handler_name) else {
            error!(
                handler_name = %handler_name,
                available_handlers = self.handlers.len(),
                "Handler not found"
            );
            return Err(DispatchError::Handler {
                message: format!("no handler registered under '{handler_name}'"),
            });
        };

        info!(
            method = %method,
            path = %path,
            handler_name = %handler_name,
            args = args.len(),
            "Request dispatched to handler"
        );
        let start = Instant::now();

        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler(&args)));

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                error!(handler_name = %handler_name, error = %err, "Handler failed");
                return Err(DispatchError::Handler {
                    message: err.to_string(),
                });
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(handler_name = %handler_name, panic_message = %message, "Handler panicked");
                return Err(DispatchError::Handler {
                    message: format!("handler panicked: {message}"),
                });
            }
        };

        let rendered = render_for_route(route_match.route.json_only, result);
        info!(
            handler_name = %handler_name,
            latency_us = start.elapsed().as_micros() as u64,
            "Handler response rendered"
        );
        Ok(rendered)
    }
}
