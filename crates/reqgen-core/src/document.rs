//! Typed subset of the OpenAPI 3 document model.
//!
//! Only the parts the resolver reads are modelled. Unknown keys are ignored,
//! and every map keeps document order so that resolution is deterministic.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Either a `{"$ref": "..."}` object or an inline value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a component.
    Ref {
        /// The reference string, e.g. `#/components/schemas/Pet`.
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An inline value.
    Item(T),
}

impl<T> RefOr<T> {
    /// The reference string, if this is a reference.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Ref { reference } => Some(reference),
            Self::Item(_) => None,
        }
    }
}

/// Root of an API description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApi {
    /// Declared servers; only the first one contributes the base path.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Path template → path item.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

/// A declared server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Absolute (`https://host/api/v1`) or relative (`/api/v1`) URL.
    pub url: String,
}

/// Reusable components addressed by `#/components/<section>/<name>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, RefOr<Schema>>,
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    #[serde(default)]
    pub request_bodies: IndexMap<String, RefOr<RequestBody>>,
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// HTTP methods recognized on a path item, in iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Lowercase method name as written in documents and rendered code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations available under one path template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    /// Parameters shared by every operation of this path.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

impl PathItem {
    /// Present operations in the fixed `get, put, post, delete, options,
    /// head, patch, trace` order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, self.get.as_ref()),
            (HttpMethod::Put, self.put.as_ref()),
            (HttpMethod::Post, self.post.as_ref()),
            (HttpMethod::Delete, self.delete.as_ref()),
            (HttpMethod::Options, self.options.as_ref()),
            (HttpMethod::Head, self.head.as_ref()),
            (HttpMethod::Patch, self.patch.as_ref()),
            (HttpMethod::Trace, self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// One HTTP-method handler under one path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    /// Status code → response.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Location tag (`path`, `query`, `body`, `cookie`, `formData`, ...).
    ///
    /// Kept as a string: unrecognized locations are dropped, not rejected.
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<RefOr<Schema>>,
    /// Swagger 2 style inline type, used when `schema` is absent.
    #[serde(rename = "type")]
    pub param_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Media type → content, in document order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    pub schema: Option<RefOr<Schema>>,
}

/// A schema's `type`: one name (3.0) or a list of names (3.1).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties`: a flag or a value schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<RefOr<Schema>>),
}

/// The JSON-Schema subset needed for client generation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub properties: IndexMap<String, RefOr<Schema>>,
    #[serde(default)]
    pub required: Vec<String>,
    pub items: Option<Box<RefOr<Schema>>>,
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(default)]
    pub all_of: Vec<RefOr<Schema>>,
    #[serde(default)]
    pub one_of: Vec<RefOr<Schema>>,
    #[serde(default)]
    pub any_of: Vec<RefOr<Schema>>,
    #[serde(default)]
    pub nullable: bool,
}
