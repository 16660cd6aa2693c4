//! String-to-typed-value coercion.
//!
//! [`coerce`] converts one raw request string into the declared semantic
//! type; a malformed input never crashes a request, it fails with a
//! [`CoercionError`] that the binder downgrades to the type's default.
//! [`default_for`] is total and returns the zero value for every type.
//!
//! Complex-object construction ([`build_object`]) is the form-to-record path:
//! each schema field is coerced from the matching form value, fields without
//! input keep their zero value.

use crate::error::CoercionError;
use crate::request::UploadedPart;
use crate::spec::{ObjectSchema, SemanticType};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// A typed argument produced by coercion/binding, one per declared parameter.
#[derive(Debug)]
pub enum BoundValue {
    Str(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    /// Merged path-variable/query/form/attribute bag.
    ValueMap(HashMap<String, Value>),
    /// A single uploaded part, moved out of the request.
    File(UploadedPart),
    /// All uploaded parts under the parameter's name.
    FileList(Vec<UploadedPart>),
    /// A form-built record, field values already coerced.
    Object(Map<String, Value>),
    /// Zero value for reference-like types with no input.
    Null,
}

impl BoundValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BoundValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            BoundValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        match self {
            BoundValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            BoundValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            BoundValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BoundValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            BoundValue::ValueMap(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            BoundValue::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Convert one raw string into `target`.
///
/// Only scalar targets are coercible from a single string; composite targets
/// (value maps, files, objects) are assembled by the binder from richer
/// inputs and report a [`CoercionError`] here.
pub fn coerce(raw: &str, target: &SemanticType) -> Result<BoundValue, CoercionError> {
    match target {
        SemanticType::Str => Ok(BoundValue::Str(raw.to_string())),
        SemanticType::Int => raw
            .trim()
            .parse::<i32>()
            .map(BoundValue::Int)
            .map_err(|_| CoercionError::new(raw, target.clone())),
        SemanticType::Long => raw
            .trim()
            .parse::<i64>()
            .map(BoundValue::Long)
            .map_err(|_| CoercionError::new(raw, target.clone())),
        SemanticType::Double => raw
            .trim()
            .parse::<f64>()
            .map(BoundValue::Double)
            .map_err(|_| CoercionError::new(raw, target.clone())),
        SemanticType::Float => raw
            .trim()
            .parse::<f32>()
            .map(BoundValue::Float)
            .map_err(|_| CoercionError::new(raw, target.clone())),
        SemanticType::Bool => raw
            .trim()
            .parse::<bool>()
            .map(BoundValue::Bool)
            .map_err(|_| CoercionError::new(raw, target.clone())),
        other => Err(CoercionError::new(raw, other.clone())),
    }
}

/// Zero value for `target`: 0 / 0.0 / false / "" / empty map or list / Null.
/// Total by design; missing input is never an error.
#[must_use]
pub fn default_for(target: &SemanticType) -> BoundValue {
    match target {
        SemanticType::Str => BoundValue::Str(String::new()),
        SemanticType::Int => BoundValue::Int(0),
        SemanticType::Long => BoundValue::Long(0),
        SemanticType::Double => BoundValue::Double(0.0),
        SemanticType::Float => BoundValue::Float(0.0),
        SemanticType::Bool => BoundValue::Bool(false),
        SemanticType::ValueMap => BoundValue::ValueMap(HashMap::new()),
        SemanticType::FileList => BoundValue::FileList(Vec::new()),
        SemanticType::File | SemanticType::Object(_) => BoundValue::Null,
    }
}

/// Coerce one raw string to a JSON value of the scalar `target`, for object
/// fields and value-map entries. Malformed input falls back to the zero
/// value, keeping field construction total.
#[must_use]
pub fn coerce_json(raw: &str, target: &SemanticType) -> Value {
    match coerce(raw, target) {
        Ok(v) => bound_to_json(&v),
        Err(err) => {
            debug!(value = %err.value, target = %err.target, "coercion failed, using zero value");
            zero_json(target)
        }
    }
}

fn bound_to_json(value: &BoundValue) -> Value {
    match value {
        BoundValue::Str(s) => Value::String(s.clone()),
        BoundValue::Int(v) => Value::from(*v),
        BoundValue::Long(v) => Value::from(*v),
        BoundValue::Double(v) => Value::from(*v),
        BoundValue::Float(v) => Value::from(f64::from(*v)),
        BoundValue::Bool(v) => Value::Bool(*v),
        _ => Value::Null,
    }
}

fn zero_json(target: &SemanticType) -> Value {
    match target {
        SemanticType::Str => Value::String(String::new()),
        SemanticType::Int | SemanticType::Long => Value::from(0),
        SemanticType::Double | SemanticType::Float => Value::from(0.0),
        SemanticType::Bool => Value::Bool(false),
        _ => Value::Null,
    }
}

/// Build a form-bound record from `schema` and the request's string inputs.
///
/// Field values come from the first form value under the field's name;
/// unmatched fields keep their zero value. This is the reflection-free
/// replacement for per-field handler code.
#[must_use]
pub fn build_object(schema: &ObjectSchema, params: &HashMap<String, Vec<String>>) -> Map<String, Value> {
    let mut object = Map::new();
    for (field, field_type) in &schema.fields {
        let value = params
            .get(field)
            .and_then(|values| values.first())
            .map(|raw| coerce_json(raw, field_type))
            .unwrap_or_else(|| zero_json(field_type));
        object.insert(field.clone(), value);
    }
    object
}
