//! Formatting helpers over one resolved operation.

use heck::ToLowerCamelCase;
use reqgen_core::{DefinitionRegistry, ResolvedOperation};

use super::types::{optional_marker, property_key, render_type};
use crate::config::ProjectConfig;

/// Argument name used in generated code for a parameter or body key.
#[must_use]
pub fn argument_name(name: &str) -> String {
    name.to_lower_camel_case()
}

/// All argument names of an operation, in group order, blanks skipped.
pub(crate) fn argument_names(op: &ResolvedOperation) -> Vec<String> {
    op.path_params
        .iter()
        .chain(&op.query_params)
        .chain(&op.body_params)
        .chain(&op.form_data_params)
        .filter(|name| !name.is_empty())
        .map(|name| argument_name(name))
        .collect()
}

/// Destructured argument list with its type, e.g.
/// `{ id, name }: { 'id': string; 'name'?: string; }`.
///
/// Empty when the operation takes no arguments.
#[must_use]
pub fn generate_request_arguments(op: &ResolvedOperation, definitions: &DefinitionRegistry) -> String {
    let names = argument_names(op);
    if names.is_empty() {
        return String::new();
    }

    let fields: Vec<String> = op
        .request_type
        .iter()
        .map(|(key, ty)| {
            format!(
                "{}{}: {};",
                property_key(&argument_name(&key.name)),
                optional_marker(key.optional),
                render_type(ty, definitions)
            )
        })
        .collect();

    if fields.is_empty() {
        format!("{{ {} }}: {{}}", names.join(", "))
    } else {
        format!("{{ {} }}: {{ {} }}", names.join(", "), fields.join(" "))
    }
}

/// Callee for an operation: the hook factory for GET, the plain request
/// function otherwise.
#[must_use]
pub fn generate_client_name(method: &str, response_type: &str, config: &ProjectConfig) -> String {
    if method.eq_ignore_ascii_case("get") {
        format!("{}<{response_type}, {}>", config.hook_factory, config.error_type)
    } else {
        format!("{}<{response_type}>", config.client_request)
    }
}
