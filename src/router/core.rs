//! Route table core - hot path for request matching.

use crate::error::RegisterError;
use crate::spec::RouteTemplate;
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path variables before heap allocation.
/// Most routes have ≤4 placeholders (e.g., `/users/{id}/posts/{postId}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated path-variable storage for the match hot path.
///
/// Variable names use `Arc<str>` because they come from the static route
/// table (known at startup); values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route (shared with the table, cheap to clone).
    pub route: Arc<RouteTemplate>,
    /// Path variables captured from `{name}` segments, in template order.
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a captured path variable by name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the captured variables to an owned map. Allocates; prefer
    /// [`RouteMatch::get_path_param`] in hot paths.
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Outcome of a table lookup.
///
/// A method mismatch is a structural outcome, not an error: the path exists
/// under other methods, which the dispatcher turns into a 405 with an
/// `Allow` header rather than a 404.
#[derive(Debug)]
pub enum RouteLookup {
    /// Exactly one route matched.
    Matched(RouteMatch),
    /// The path is covered, but not by the request's method. Carries the
    /// methods registered for this path.
    MethodMismatch(Vec<Method>),
    /// No registered route covers the path at all.
    NoRoute,
}

/// One segment of a compiled template.
#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    /// `{name}` placeholder; matches any single non-empty segment.
    Param(Arc<str>),
}

/// A templated route compiled to its segment list at registration time.
#[derive(Debug, Clone)]
struct CompiledRoute {
    /// Registration index, the route's precedence rank.
    index: usize,
    segments: Vec<Segment>,
    route: Arc<RouteTemplate>,
}

impl CompiledRoute {
    /// Segment-wise match against an already-split request path. Returns the
    /// captured variables on success.
    fn capture(&self, path_segments: &[&str]) -> Option<ParamVec> {
        if self.segments.len() != path_segments.len() {
            return None;
        }
        let mut params = ParamVec::new();
        for (segment, part) in self.segments.iter().zip(path_segments) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.push((Arc::clone(name), (*part).to_string()));
                }
            }
        }
        Some(params)
    }
}

/// Immutable-after-startup route table.
///
/// Exact routes live in a per-path map for O(1) lookup; templated routes are
/// scanned in registration order. Once serving begins the table is shared by
/// `Arc` across request handlers — lookups are pure reads and need no
/// synchronization.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// Literal routes keyed by path, `(method, registration index, route)`
    /// listed per path.
    exact: HashMap<String, Vec<(Method, usize, Arc<RouteTemplate>)>>,
    /// Templated routes in registration order.
    templated: Vec<CompiledRoute>,
    /// Every registered route in registration order, for dumps and method
    /// enumeration.
    routes: Vec<Arc<RouteTemplate>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from discovery output, registering in sequence order.
    pub fn build(routes: Vec<RouteTemplate>) -> Result<Self, RegisterError> {
        let mut table = Self::new();
        for route in routes {
            table.register(route)?;
        }
        info!(
            routes_count = table.routes.len(),
            templated_count = table.templated.len(),
            "Routing table loaded"
        );
        Ok(table)
    }

    /// Register one route. Startup-only; fails on a repeated
    /// `(method, path template)` pair or a repeated placeholder name.
    pub fn register(&mut self, route: RouteTemplate) -> Result<(), RegisterError> {
        if self
            .routes
            .iter()
            .any(|r| r.method == route.method && r.path_pattern == route.path_pattern)
        {
            return Err(RegisterError::DuplicateRoute {
                method: route.method,
                path_pattern: route.path_pattern,
            });
        }

        let route = Arc::new(route);
        let index = self.routes.len();
        if route.is_templated() {
            let segments = Self::compile_segments(&route.path_pattern)?;
            self.templated.push(CompiledRoute {
                index,
                segments,
                route: Arc::clone(&route),
            });
        } else {
            self.exact
                .entry(route.path_pattern.clone())
                .or_default()
                .push((route.method.clone(), index, Arc::clone(&route)));
        }

        debug!(
            method = %route.method,
            path_pattern = %route.path_pattern,
            handler_name = %route.handler_name,
            templated = route.is_templated(),
            "Route registered"
        );
        self.routes.push(route);
        Ok(())
    }

    fn compile_segments(pattern: &str) -> Result<Vec<Segment>, RegisterError> {
        let mut segments = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        for part in pattern.split('/') {
            if part.starts_with('{') && part.ends_with('}') {
                let name = &part[1..part.len() - 1];
                if seen.contains(&name) {
                    return Err(RegisterError::DuplicatePlaceholder {
                        path_pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                seen.push(name);
                segments.push(Segment::Param(Arc::from(name)));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Ok(segments)
    }

    /// Match a request against the table.
    ///
    /// Precedence is pure registration order across all routes. The exact
    /// map is the O(1) fast path for the common case; when an exact hit
    /// exists, only templates registered before it are still scanned, and an
    /// earlier-registered template that covers the same path wins (the
    /// documented first-registered-wins policy, which an exact literal does
    /// not override).
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> RouteLookup {
        let path = if path.is_empty() { "/" } else { path };
        debug!(method = %method, path = %path, "Route match attempt");

        let mut path_known = false;
        let mut exact_hit: Option<(usize, &Arc<RouteTemplate>)> = None;
        if let Some(entries) = self.exact.get(path) {
            path_known = true;
            exact_hit = entries
                .iter()
                .find(|(m, _, _)| m == method)
                .map(|(_, index, route)| (*index, route));
        }
        let limit = exact_hit.map_or(usize::MAX, |(index, _)| index);

        let path_segments: Vec<&str> = path.split('/').collect();
        for compiled in &self.templated {
            if compiled.index >= limit {
                break;
            }
            if let Some(params) = compiled.capture(&path_segments) {
                if compiled.route.method == *method {
                    info!(
                        method = %method,
                        path = %path,
                        route_pattern = %compiled.route.path_pattern,
                        handler_name = %compiled.route.handler_name,
                        path_params = ?params,
                        "Route matched (templated)"
                    );
                    return RouteLookup::Matched(RouteMatch {
                        route: Arc::clone(&compiled.route),
                        path_params: params,
                    });
                }
                path_known = true;
            }
        }

        if let Some((_, route)) = exact_hit {
            info!(
                method = %method,
                path = %path,
                handler_name = %route.handler_name,
                "Route matched (exact)"
            );
            return RouteLookup::Matched(RouteMatch {
                route: Arc::clone(route),
                path_params: ParamVec::new(),
            });
        }

        if path_known {
            let allowed = self.allowed_methods(path);
            warn!(method = %method, path = %path, allowed = ?allowed, "Method not allowed");
            RouteLookup::MethodMismatch(allowed)
        } else {
            warn!(method = %method, path = %path, "No route matched");
            RouteLookup::NoRoute
        }
    }

    /// Convenience wrapper over [`RouteTable::lookup`] that flattens the
    /// method-mismatch case into `None`.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        match self.lookup(method, path) {
            RouteLookup::Matched(m) => Some(m),
            _ => None,
        }
    }

    /// Methods registered for a path, exact entries first then matching
    /// templates, deduplicated in registration order. Feeds the 405 `Allow`
    /// header.
    #[must_use]
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let path = if path.is_empty() { "/" } else { path };
        let mut methods: Vec<Method> = Vec::new();
        if let Some(entries) = self.exact.get(path) {
            for (method, _, _) in entries {
                if !methods.contains(method) {
                    methods.push(method.clone());
                }
            }
        }
        let path_segments: Vec<&str> = path.split('/').collect();
        for compiled in &self.templated {
            if compiled.capture(&path_segments).is_some()
                && !methods.contains(&compiled.route.method)
            {
                methods.push(compiled.route.method.clone());
            }
        }
        methods
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over registered routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteTemplate>> {
        self.routes.iter()
    }

    /// Print the registered table to stdout. Useful at startup for verifying
    /// discovery output.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> {}{}",
                route.method,
                route.path_pattern,
                route.handler_name,
                if route.json_only { " [json]" } else { "" }
            );
        }
    }
}
