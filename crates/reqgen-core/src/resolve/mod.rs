//! Resolution pass: API description → resolved operations + named shapes.
//!
//! The [`PathResolver`] drives the walk and calls into the
//! [`SchemaResolver`] for every parameter, request body and response
//! schema. Both share one [`DefinitionRegistry`], threaded through
//! explicitly, so independent passes never see each other's state.

mod path;
mod reference;
mod registry;
mod schema;
mod types;

pub use path::{base_path, url_template, PathResolver};
pub use registry::DefinitionRegistry;
pub use schema::SchemaResolver;
pub use types::{
    Definition, FieldKey, Fields, Primitive, RequestTypeMap, ResolvedOperation, TypeDescriptor,
};

use serde::Serialize;

use crate::document::OpenApi;
use crate::error::Result;

/// Everything an emitter needs from one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Sorted by `operation_id`, ascending; ties keep path-table order.
    pub operations: Vec<ResolvedOperation>,
    pub definitions: DefinitionRegistry,
}

/// Run a full pass over `document` with a fresh registry.
///
/// # Errors
///
/// Fails on the first dangling, unsupported, or cyclic reference.
pub fn resolve_document(document: &OpenApi) -> Result<Resolution> {
    let mut definitions = DefinitionRegistry::new();
    let mut operations = PathResolver::new(document).resolve(&mut definitions)?;
    operations.sort_by(|a, b| a.operation_id.cmp(&b.operation_id));

    tracing::debug!(
        operations = operations.len(),
        definitions = definitions.len(),
        "resolved document"
    );

    Ok(Resolution {
        operations,
        definitions,
    })
}
