//! TypeScript emitter for a [`Resolution`].
//!
//! Output layout:
//!
//! 1. config header lines
//! 2. one request declaration per operation, in resolution order
//! 3. one declaration per registry entry, in name order
//!
//! GET operations are wrapped in the hook factory; every other method calls
//! the plain request function directly.

mod helpers;
mod types;

use reqgen_core::naming::generate_function_name;
use reqgen_core::{resolve_document, DefinitionRegistry, HttpMethod, Resolution, ResolvedOperation};

pub use helpers::{argument_name, generate_client_name, generate_request_arguments};
pub use types::{render_definition, render_type};

use types::property_key;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::load::load_document;

const JSON_CONTENT_TYPE: &str = "application/json";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// Parse, resolve and render an API description in one go.
///
/// # Errors
///
/// Returns an error if the text is neither JSON nor YAML, or if resolution
/// fails on a reference.
pub fn generate(text: &str, config: &ProjectConfig) -> Result<String> {
    let document = load_document(text)?;
    let resolution = resolve_document(&document)?;
    Ok(render(&resolution, config))
}

/// Render a full TypeScript module.
#[must_use]
pub fn render(resolution: &Resolution, config: &ProjectConfig) -> String {
    let mut sections = Vec::new();

    if !config.file_headers.is_empty() {
        sections.push(config.file_headers.join("\n"));
    }
    for op in &resolution.operations {
        sections.push(render_operation(op, &resolution.definitions, config));
    }
    for (name, definition) in &resolution.definitions {
        sections.push(render_definition(name, definition, &resolution.definitions));
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

/// Render the request declaration of one operation.
#[must_use]
pub fn render_operation(
    op: &ResolvedOperation,
    definitions: &DefinitionRegistry,
    config: &ProjectConfig,
) -> String {
    let name = generate_function_name(op.method.as_str(), &op.operation_id);
    let response = render_type(&op.response_type, definitions);
    let client = generate_client_name(op.method.as_str(), &response, config);
    let arguments = generate_request_arguments(op, definitions);

    if op.method == HttpMethod::Get {
        let body = request_object(op, "  ");
        format!("export const {name} = {client}(({arguments}) => ({{\n{body}}}));")
    } else {
        let body = request_object(op, "    ");
        format!("export const {name} = ({arguments}) =>\n  {client}({{\n{body}  }});")
    }
}

/// Property lines of the request config object, each ending in `,\n`.
fn request_object(op: &ResolvedOperation, indent: &str) -> String {
    let mut lines = vec![
        format!("url: `{}`", interpolate_url(&op.url)),
        format!("method: \"{}\"", op.method),
    ];

    let params: Vec<String> = op
        .query_params
        .iter()
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let arg = argument_name(raw);
            if arg == *raw {
                arg
            } else {
                format!("{}: {arg}", property_key(raw))
            }
        })
        .collect();
    if !params.is_empty() {
        lines.push(format!("params: {{ {} }}", params.join(", ")));
    }

    let form = first_named(&op.form_data_params);
    if let Some(data) = first_named(&op.body_params).or(form) {
        let content_type = if form.is_some() {
            MULTIPART_CONTENT_TYPE
        } else {
            JSON_CONTENT_TYPE
        };
        lines.push(format!("data: {}", argument_name(data)));
        lines.push(format!("headers: {{ \"Content-Type\": \"{content_type}\" }}"));
    }

    lines
        .iter()
        .map(|line| format!("{indent}{line},\n"))
        .collect()
}

fn first_named(names: &[String]) -> Option<&str> {
    names.iter().map(String::as_str).find(|name| !name.is_empty())
}

/// Rewrite `${raw_name}` placeholders to their camelCase argument names.
fn interpolate_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(start) = rest.find("${") {
        let (head, tail) = rest.split_at(start + 2);
        out.push_str(head);
        match tail.find('}') {
            Some(end) => {
                out.push_str(&argument_name(&tail[..end]));
                rest = &tail[end..];
            }
            None => {
                rest = tail;
                break;
            }
        }
    }
    out.push_str(rest);
    out
}
