//! Handler result rendering.
//!
//! Handler results are a closed tagged union ([`HandlerResult`]) instead of
//! an open-ended runtime type dispatch: a handler returns a view-model, a
//! string, a JSON value, or nothing, and [`render`] maps that shape onto the
//! response action the transport executes ([`DispatchResult`]).
//!
//! String results follow the `redirect:` string convention: a
//! string beginning with that literal prefix becomes a redirect to the
//! remainder, any other string is an HTML body. JSON bodies are encoded with
//! `serde_json`; object key order is implementation-defined and callers must
//! not rely on it.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Literal prefix that turns a string result into a redirect.
pub const REDIRECT_PREFIX: &str = "redirect:";

/// Fixed acknowledgement body for handlers that return nothing.
pub const ACK_BODY: &str = "OK";

/// A view identifier paired with a named-attribute bag, destined for the
/// external template engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewModel {
    /// View identifier the transport forwards to.
    pub view: String,
    /// Attributes installed on the forwarded request.
    pub attributes: HashMap<String, Value>,
}

impl ViewModel {
    #[must_use]
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            attributes: HashMap::new(),
        }
    }

    /// Install an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Install an attribute in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }
}

/// What a handler may return. Closed by design; anything printable enters as
/// `Text`, anything serializable as `Json`.
#[derive(Debug, Clone)]
pub enum HandlerResult {
    /// Forward to a view with attributes.
    View(ViewModel),
    /// Plain string; `redirect:` prefix requests a redirect, anything else
    /// is an HTML body.
    Text(String),
    /// Maps, collections and scalars, rendered as a JSON body.
    Json(Value),
    /// No value.
    Unit,
}

/// Response action handed to the transport. Serializable so transports can
/// ship the action across a process boundary or log it structurally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DispatchResult {
    /// Forward to the named view with the given attributes; template
    /// execution is external.
    Forward {
        view: String,
        attributes: HashMap<String, Value>,
    },
    /// 3xx redirect to `location`.
    Redirect { location: String },
    /// JSON body with `application/json` content type.
    JsonBody(Value),
    /// Literal body with the given content type.
    TextBody {
        content_type: String,
        text: String,
    },
    /// 200 with the fixed acknowledgement body.
    Empty,
}

impl DispatchResult {
    /// Serialized body text for results that carry one.
    #[must_use]
    pub fn body_text(&self) -> Option<String> {
        match self {
            DispatchResult::JsonBody(value) => Some(value.to_string()),
            DispatchResult::TextBody { text, .. } => Some(text.clone()),
            DispatchResult::Empty => Some(ACK_BODY.to_string()),
            _ => None,
        }
    }
}

/// Map a handler result onto its response action.
#[must_use]
pub fn render(result: HandlerResult) -> DispatchResult {
    match result {
        HandlerResult::View(model) => DispatchResult::Forward {
            view: model.view,
            attributes: model.attributes,
        },
        HandlerResult::Text(text) => match text.strip_prefix(REDIRECT_PREFIX) {
            Some(location) => DispatchResult::Redirect {
                location: location.to_string(),
            },
            None => DispatchResult::TextBody {
                content_type: "text/html".to_string(),
                text,
            },
        },
        HandlerResult::Json(value) => DispatchResult::JsonBody(value),
        HandlerResult::Unit => DispatchResult::Empty,
    }
}

/// Render for a JSON-only route: every result shape becomes a JSON body.
///
/// View results serialize as `{"view": …, "data": …}` and plain strings as
/// `{"result": …}`, the `@Json`-style envelope;
/// redirect strings are not special-cased here, the JSON flag wins.
#[must_use]
pub fn render_json_only(result: HandlerResult) -> DispatchResult {
    match result {
        HandlerResult::View(model) => {
            let mut envelope = Map::new();
            envelope.insert("view".to_string(), Value::String(model.view));
            envelope.insert(
                "data".to_string(),
                Value::Object(model.attributes.into_iter().collect()),
            );
            DispatchResult::JsonBody(Value::Object(envelope))
        }
        HandlerResult::Text(text) => DispatchResult::JsonBody(json!({ "result": text })),
        HandlerResult::Json(value) => DispatchResult::JsonBody(value),
        HandlerResult::Unit => DispatchResult::JsonBody(Value::Null),
    }
}

/// Render according to the route's JSON flag.
#[must_use]
pub fn render_for_route(json_only: bool, result: HandlerResult) -> DispatchResult {
    if json_only {
        render_json_only(result)
    } else {
        render(result)
    }
}
