//! Argument binding for matched routes.
//!
//! [`bind`] walks the matched route's declared parameter table and produces
//! one [`BoundValue`] per parameter, in declaration order. Binding is
//! best-effort by design: a malformed scalar degrades to the type's zero
//! value rather than aborting the request, so handlers that care validate
//! their bound values themselves.
//!
//! Precedence per parameter, highest first (effective name = request-key
//! override or declared name):
//!
//! 1. path variable under the effective name (scalar targets);
//! 2. uploaded part(s) for `File` / `FileList` targets;
//! 3. query/form value under the effective name;
//! 4. for `ValueMap`, the merged bag of attributes, query/form values and
//!    path variables — path variables win on key collision;
//! 5. otherwise the type's default value.
//!
//! Form-bound objects bypass the per-field precedence: their fields come
//! from form data only, never from path variables.

use crate::coerce::{build_object, coerce, coerce_json, default_for, BoundValue};
use crate::request::RequestView;
use crate::router::RouteMatch;
use crate::spec::{SchemaRegistry, SemanticType};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Bind the matched route's parameters against one request.
///
/// Takes the request mutably because uploaded parts are moved out of it;
/// their byte sources are readable at most once and belong to whichever
/// parameter claimed them.
#[must_use]
pub fn bind(
    route_match: &RouteMatch,
    request: &mut RequestView,
    schemas: &SchemaRegistry,
) -> Vec<BoundValue> {
    let route = &route_match.route;
    let mut args = Vec::with_capacity(route.parameters.len());

    for param in &route.parameters {
        let name = param.effective_name();
        let value = match &param.semantic {
            semantic if semantic.is_scalar() => bind_scalar(route_match, request, name, semantic),
            SemanticType::File => match request
                .parts
                .get_mut(name)
                .filter(|parts| !parts.is_empty())
                .map(|parts| parts.remove(0))
            {
                Some(part) => BoundValue::File(part),
                None => default_for(&SemanticType::File),
            },
            SemanticType::FileList => BoundValue::FileList(
                request.parts.remove(name).unwrap_or_default(),
            ),
            SemanticType::ValueMap => BoundValue::ValueMap(merged_values(route_match, request)),
            SemanticType::Object(schema_name) => match schemas.get(schema_name) {
                Some(schema) => BoundValue::Object(build_object(schema, &request.params)),
                None => {
                    warn!(
                        parameter = %param.name,
                        schema = %schema_name,
                        "No object schema registered, binding null"
                    );
                    BoundValue::Null
                }
            },
            // Scalars are handled by the guard above; nothing else remains.
            other => default_for(other),
        };

        debug!(parameter = %param.name, semantic = %param.semantic, value = ?value, "Parameter bound");
        args.push(value);
    }

    args
}

/// Scalar binding: path variable, then query/form value, then default.
/// Coercion failures downgrade to the zero value.
fn bind_scalar(
    route_match: &RouteMatch,
    request: &RequestView,
    name: &str,
    semantic: &SemanticType,
) -> BoundValue {
    let raw = route_match
        .get_path_param(name)
        .or_else(|| request.param(name));
    match raw {
        Some(raw) => coerce(raw, semantic).unwrap_or_else(|err| {
            warn!(
                parameter = %name,
                value = %err.value,
                target = %err.target,
                "Coercion failed, binding zero value"
            );
            default_for(semantic)
        }),
        None => default_for(semantic),
    }
}

/// The `ValueMap` bag: request attributes, then query/form values, then path
/// variables, later inserts overriding earlier ones on key collision. Path
/// variables winning over query/form is the documented policy.
fn merged_values(route_match: &RouteMatch, request: &RequestView) -> HashMap<String, Value> {
    let mut merged: HashMap<String, Value> = request.attributes.clone();

    for (name, values) in &request.params {
        let semantic = declared_type(route_match, name);
        let value = match values.as_slice() {
            [] => continue,
            [single] => coerce_json(single, &semantic),
            many => Value::Array(
                many.iter()
                    .map(|v| Value::String(v.clone()))
                    .collect(),
            ),
        };
        merged.insert(name.clone(), value);
    }

    for (name, value) in &route_match.path_params {
        let semantic = declared_type(route_match, name);
        merged.insert(name.to_string(), coerce_json(value, &semantic));
    }

    merged
}

/// Declared scalar type for a request key, `Str` when no parameter declares
/// it. Lets the value map carry `age: 21` instead of `age: "21"` when the
/// handler declared `age` as an int.
fn declared_type(route_match: &RouteMatch, name: &str) -> SemanticType {
    route_match
        .route
        .parameters
        .iter()
        .find(|p| p.effective_name() == name && p.semantic.is_scalar())
        .map(|p| p.semantic.clone())
        .unwrap_or(SemanticType::Str)
}
