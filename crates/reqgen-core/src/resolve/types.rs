//! Output model of a resolution pass, consumed by emitters.

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::document::HttpMethod;

/// Primitive type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    /// Both `integer` and `number`.
    Number,
    Boolean,
    Null,
    /// Swagger 2 `type: file` upload.
    File,
}

impl Primitive {
    /// Map a schema `type` name; `object`, `array` and unknown names are not
    /// primitives.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" | "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// A field name plus its optionality marker.
///
/// Renders as `name` for required fields and `name?` for optional ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub name: String,
    pub optional: bool,
}

impl FieldKey {
    /// Key for a field that is required iff `required`.
    #[must_use]
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            optional: !required,
        }
    }

    /// A required field key.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered field map of a composite shape.
pub type Fields = IndexMap<FieldKey, TypeDescriptor>;

/// Canonical shape of a schema, independent of the document's references.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Inline object shape.
    Object(Fields),
    /// Reference to an entry of the [`DefinitionRegistry`](super::DefinitionRegistry).
    Named(String),
    Array(Box<TypeDescriptor>),
    /// String-keyed map from `additionalProperties`.
    Map(Box<TypeDescriptor>),
    Union(Vec<TypeDescriptor>),
    Intersection(Vec<TypeDescriptor>),
    /// No schema, or nothing recognizable in it.
    Unknown,
}

impl TypeDescriptor {
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self::Array(Box::new(items))
    }
}

impl From<Primitive> for TypeDescriptor {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

/// A named shape stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "shape", rename_all = "snake_case")]
pub enum Definition {
    Object(Fields),
    /// Enumerated value set, in declaration order.
    Enum(Vec<serde_json::Value>),
    /// A referenced component that is neither an object nor an enum.
    Alias(TypeDescriptor),
}

/// Request field map: parameter or body key → type.
pub type RequestTypeMap = IndexMap<FieldKey, TypeDescriptor>;

/// Normalized, self-contained description of one (path, method) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOperation {
    /// Base path plus path template with `${name}` placeholders.
    pub url: String,
    pub method: HttpMethod,
    /// Empty when the document omits it.
    pub operation_id: String,
    pub path_params: Vec<String>,
    pub query_params: Vec<String>,
    /// `in: body` parameters, followed by the request-body key if any.
    pub body_params: Vec<String>,
    /// `in: cookie` / `in: formData` parameters.
    pub form_data_params: Vec<String>,
    pub request_type: RequestTypeMap,
    pub response_type: TypeDescriptor,
}
