//! TypeScript rendering of type descriptors and registry entries.

use reqgen_core::{Definition, DefinitionRegistry, Fields, Primitive, TypeDescriptor};
use serde_json::Value;

/// Render a type expression.
///
/// Enums are emitted as `const` objects keyed by their values' text. A
/// reference to one renders as `keyof typeof Name` when every value is a
/// string, and as the union of its values, `(typeof Name)[keyof typeof Name]`,
/// otherwise.
#[must_use]
pub fn render_type(ty: &TypeDescriptor, definitions: &DefinitionRegistry) -> String {
    match ty {
        TypeDescriptor::Primitive(primitive) => primitive_name(*primitive).to_string(),
        TypeDescriptor::Object(fields) => inline_object(fields, definitions),
        TypeDescriptor::Named(name) => match definitions.get(name) {
            Some(Definition::Enum(values)) if all_strings(values) => format!("keyof typeof {name}"),
            Some(Definition::Enum(_)) => format!("(typeof {name})[keyof typeof {name}]"),
            _ => name.clone(),
        },
        TypeDescriptor::Array(items) => {
            let inner = render_type(items, definitions);
            if needs_parens(items, definitions) {
                format!("({inner})[]")
            } else {
                format!("{inner}[]")
            }
        }
        TypeDescriptor::Map(values) => {
            format!("{{ [key: string]: {} }}", render_type(values, definitions))
        }
        TypeDescriptor::Union(variants) => join(variants, " | ", definitions),
        TypeDescriptor::Intersection(parts) => join(parts, " & ", definitions),
        TypeDescriptor::Unknown => "any".to_string(),
    }
}

/// Render a shared declaration for one registry entry.
#[must_use]
pub fn render_definition(name: &str, definition: &Definition, definitions: &DefinitionRegistry) -> String {
    match definition {
        Definition::Object(fields) => {
            let members: String = fields
                .iter()
                .map(|(key, ty)| {
                    format!(
                        "  {}{}: {};\n",
                        property_key(&key.name),
                        optional_marker(key.optional),
                        render_type(ty, definitions)
                    )
                })
                .collect();
            format!("export interface {name} {{\n{members}}}")
        }
        Definition::Enum(values) => {
            let members: String = values
                .iter()
                .map(|value| format!("  {}: {value},\n", enum_key(value)))
                .collect();
            format!("export const {name} = {{\n{members}}} as const;")
        }
        Definition::Alias(ty) => format!("export type {name} = {};", render_type(ty, definitions)),
    }
}

/// Single-quoted property name; backslashes and quotes are escaped.
pub(crate) fn property_key(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for c in name.chars() {
        if matches!(c, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

pub(crate) fn optional_marker(optional: bool) -> &'static str {
    if optional {
        "?"
    } else {
        ""
    }
}

fn primitive_name(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "string",
        Primitive::Number => "number",
        Primitive::Boolean => "boolean",
        Primitive::Null => "null",
        Primitive::File => "File",
    }
}

fn inline_object(fields: &Fields, definitions: &DefinitionRegistry) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let members: String = fields
        .iter()
        .map(|(key, ty)| {
            format!(
                "{}{}: {}; ",
                property_key(&key.name),
                optional_marker(key.optional),
                render_type(ty, definitions)
            )
        })
        .collect();
    format!("{{ {members}}}")
}

fn join(members: &[TypeDescriptor], separator: &str, definitions: &DefinitionRegistry) -> String {
    members
        .iter()
        .map(|member| {
            let rendered = render_type(member, definitions);
            if needs_parens(member, definitions) {
                format!("({rendered})")
            } else {
                rendered
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// Whether a type must be parenthesized inside `T[]`, `A | B` or `A & B`.
fn needs_parens(ty: &TypeDescriptor, definitions: &DefinitionRegistry) -> bool {
    match ty {
        TypeDescriptor::Union(_) | TypeDescriptor::Intersection(_) => true,
        TypeDescriptor::Named(name) => {
            matches!(definitions.get(name), Some(Definition::Enum(values)) if all_strings(values))
        }
        _ => false,
    }
}

fn all_strings(values: &[Value]) -> bool {
    values.iter().all(Value::is_string)
}

/// Quoted object key for an enum member: the value itself, as a string.
fn enum_key(value: &Value) -> String {
    match value {
        Value::String(text) => Value::String(text.clone()).to_string(),
        other => Value::String(other.to_string()).to_string(),
    }
}
