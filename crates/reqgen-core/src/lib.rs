//! Resolution engine for OpenAPI-driven request generators.
//!
//! Walks an API description's path, operation and schema graph and produces
//! a deterministic model for code emitters:
//!
//! - one [`ResolvedOperation`] per (path, method) pair, with parameters
//!   grouped by location, a request field map and a response type
//! - a [`DefinitionRegistry`] of the named shapes (referenced components,
//!   enums) met along the way
//!
//! ```ignore
//! let document: reqgen_core::OpenApi = serde_json::from_str(text)?;
//! let resolution = reqgen_core::resolve_document(&document)?;
//! for op in &resolution.operations {
//!     println!("{} {}", op.method, op.url);
//! }
//! ```
//!
//! Rendering is left to the caller; nothing here performs I/O.

#![forbid(unsafe_code)]

pub mod document;
mod error;
pub mod naming;
mod resolve;

pub use document::{HttpMethod, OpenApi};
pub use error::{Error, Result};
pub use resolve::{
    base_path, resolve_document, url_template, Definition, DefinitionRegistry, FieldKey, Fields,
    PathResolver, Primitive, RequestTypeMap, Resolution, ResolvedOperation, SchemaResolver,
    TypeDescriptor,
};
