use http::Method;
use std::collections::HashMap;

/// Logical type a handler parameter is declared to need, independent of how
/// the transport delivered the raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticType {
    /// Plain string (the coercion identity).
    Str,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// Boolean (`"true"` / `"false"`).
    Bool,
    /// The merged bag of path variables, query/form values and request
    /// attributes, delivered as one map.
    ValueMap,
    /// A single uploaded multipart file.
    File,
    /// All uploaded files sharing the parameter's name.
    FileList,
    /// A form-bound record, built field by field from an [`ObjectSchema`]
    /// registered under the carried schema name.
    Object(String),
}

impl SemanticType {
    /// Whether this type is coercible from a single raw string.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            SemanticType::Str
                | SemanticType::Int
                | SemanticType::Long
                | SemanticType::Double
                | SemanticType::Float
                | SemanticType::Bool
        )
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Str => write!(f, "string"),
            SemanticType::Int => write!(f, "int"),
            SemanticType::Long => write!(f, "long"),
            SemanticType::Double => write!(f, "double"),
            SemanticType::Float => write!(f, "float"),
            SemanticType::Bool => write!(f, "bool"),
            SemanticType::ValueMap => write!(f, "value-map"),
            SemanticType::File => write!(f, "file"),
            SemanticType::FileList => write!(f, "file-list"),
            SemanticType::Object(name) => write!(f, "object<{name}>"),
        }
    }
}

/// One declared handler parameter.
///
/// `source_name` lets a parameter bind to a request key different from its
/// declared name (the `@Request`-style override).
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Declared parameter name.
    pub name: String,
    /// Declared semantic type.
    pub semantic: SemanticType,
    /// Optional request-key override.
    pub source_name: Option<String>,
}

impl ParameterSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, semantic: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic,
            source_name: None,
        }
    }

    /// Same as [`ParameterSpec::new`] but binding to `source` instead of the
    /// declared name.
    #[must_use]
    pub fn renamed(
        name: impl Into<String>,
        semantic: SemanticType,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            semantic,
            source_name: Some(source.into()),
        }
    }

    /// The request key this parameter binds against.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.source_name.as_deref().unwrap_or(&self.name)
    }
}

/// A registered route: method + path template + handler reference + the
/// declared parameter table. Immutable once handed to the route table.
///
/// The path template is a `/`-separated sequence of segments, each either a
/// literal or a `{name}` placeholder. Placeholder names must be unique within
/// one template and the segment count is fixed (no wildcard segments).
#[derive(Debug, Clone)]
pub struct RouteTemplate {
    /// HTTP method this route answers.
    pub method: Method,
    /// Path template, e.g. `/etudiant/{id}`.
    pub path_pattern: String,
    /// Name of the registered handler invoked on a match.
    pub handler_name: String,
    /// Declared handler parameters, in declaration order.
    pub parameters: Vec<ParameterSpec>,
    /// Force JSON rendering of whatever the handler returns (the
    /// `@Json`-style route flag).
    pub json_only: bool,
}

impl RouteTemplate {
    #[must_use]
    pub fn new(
        method: Method,
        path_pattern: impl Into<String>,
        handler_name: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path_pattern: path_pattern.into(),
            handler_name: handler_name.into(),
            parameters: Vec::new(),
            json_only: false,
        }
    }

    /// Attach the declared parameter table.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterSpec>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Mark the route as JSON-only.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_only = true;
        self
    }

    /// Whether the template contains at least one `{name}` placeholder.
    #[must_use]
    pub fn is_templated(&self) -> bool {
        self.path_pattern.contains('{')
    }
}

/// Ordered field-name/semantic-type list for a form-bound record type.
///
/// Replaces field reflection: the same metadata source that supplies
/// [`ParameterSpec`] tables declares, per record type, which fields exist and
/// what scalar type each coerces to.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Schema name referenced by [`SemanticType::Object`].
    pub name: String,
    /// Fields in declaration order; only scalar field types are meaningful.
    pub fields: Vec<(String, SemanticType)>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<(String, SemanticType)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Lookup table of object schemas, built at startup next to the route table.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ObjectSchema>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under its own name. Last registration wins.
    pub fn register(&mut self, schema: ObjectSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectSchema> {
        self.schemas.get(name)
    }
}
