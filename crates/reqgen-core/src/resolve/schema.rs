//! Schema fragment → [`TypeDescriptor`] conversion.

use std::collections::HashMap;

use crate::document::{AdditionalProperties, Components, RefOr, Schema, SchemaType};
use crate::error::{Error, Result};
use crate::naming::to_capital_case;

use super::reference::{self, SCHEMAS};
use super::registry::DefinitionRegistry;
use super::types::{Definition, FieldKey, Fields, Primitive, TypeDescriptor};

/// Resolves schema fragments, registering the named shapes it meets.
///
/// One resolver is used for a whole pass: it memoizes every schema
/// reference it has seen, so each component is resolved once and
/// self-referencing components terminate on their name.
#[derive(Debug)]
pub struct SchemaResolver<'d, 'r> {
    components: &'d Components,
    registry: &'r mut DefinitionRegistry,
    /// Reference string → registered name.
    names: HashMap<String, String>,
    /// Components being resolved whose whole schema is another `$ref`.
    aliasing: Vec<String>,
}

impl<'d, 'r> SchemaResolver<'d, 'r> {
    pub fn new(components: &'d Components, registry: &'r mut DefinitionRegistry) -> Self {
        Self {
            components,
            registry,
            names: HashMap::new(),
            aliasing: Vec::new(),
        }
    }

    /// Resolve `schema` in the context of field `key` inside `parent_key`.
    ///
    /// The keys only matter for naming enums discovered on the way. A missing
    /// schema resolves to [`TypeDescriptor::Unknown`].
    ///
    /// # Errors
    ///
    /// Fails when a reference is dangling or not a local schema reference.
    pub fn resolve(
        &mut self,
        schema: Option<&RefOr<Schema>>,
        key: &str,
        parent_key: &str,
    ) -> Result<TypeDescriptor> {
        match schema {
            None => Ok(TypeDescriptor::Unknown),
            Some(RefOr::Ref { reference }) => self.resolve_reference(reference),
            Some(RefOr::Item(schema)) => self.resolve_schema(schema, key, parent_key),
        }
    }

    /// Resolve a `#/components/schemas/<name>` reference to a named type.
    ///
    /// # Errors
    ///
    /// Fails when the reference is dangling or targets another section, or
    /// when components alias each other in a loop without any structure in
    /// between.
    pub fn resolve_reference(&mut self, reference: &str) -> Result<TypeDescriptor> {
        if let Some(name) = self.names.get(reference) {
            return Ok(TypeDescriptor::Named(name.clone()));
        }

        let components = self.components;
        let component = reference::component_name(reference, SCHEMAS)?;
        let target = components
            .schemas
            .get(component.as_ref())
            .ok_or_else(|| Error::DanglingReference {
                reference: reference.to_string(),
            })?;

        let name = self.registry.reserve(&to_capital_case(&component));
        self.names.insert(reference.to_string(), name.clone());

        let definition = match target {
            RefOr::Ref { reference: next } => {
                if next == reference || self.aliasing.iter().any(|seen| seen == next) {
                    return Err(Error::ReferenceCycle {
                        reference: next.clone(),
                    });
                }
                self.aliasing.push(reference.to_string());
                let aliased = self.resolve_reference(next);
                self.aliasing.pop();
                Definition::Alias(aliased?)
            }
            RefOr::Item(schema) => {
                // Structure breaks an alias chain: references met inside it
                // may point back and end on the name.
                let chain = std::mem::take(&mut self.aliasing);
                let defined = self.define(schema, &name);
                self.aliasing = chain;
                defined?
            }
        };
        self.registry.fill(name.clone(), definition);

        Ok(TypeDescriptor::Named(name))
    }

    /// Shape stored in the registry for a referenced component.
    fn define(&mut self, schema: &Schema, name: &str) -> Result<Definition> {
        if let Some(values) = enum_values(schema) {
            return Ok(Definition::Enum(values.to_vec()));
        }
        if is_plain_object(schema) {
            return Ok(Definition::Object(self.fields(schema, name)?));
        }
        Ok(Definition::Alias(self.resolve_schema(schema, name, name)?))
    }

    fn resolve_schema(&mut self, schema: &Schema, key: &str, parent_key: &str) -> Result<TypeDescriptor> {
        let resolved = if let Some(values) = enum_values(schema) {
            let name = self
                .registry
                .register(&enum_name(key, parent_key), Definition::Enum(values.to_vec()));
            TypeDescriptor::Named(name)
        } else if !schema.all_of.is_empty() {
            collapse(self.resolve_all(&schema.all_of, key, parent_key)?, TypeDescriptor::Intersection)
        } else if !schema.one_of.is_empty() || !schema.any_of.is_empty() {
            let mut variants = self.resolve_all(&schema.one_of, key, parent_key)?;
            variants.extend(self.resolve_all(&schema.any_of, key, parent_key)?);
            collapse(variants, TypeDescriptor::Union)
        } else {
            match &schema.schema_type {
                Some(SchemaType::Single(name)) => self.resolve_typed(name, schema, key, parent_key)?,
                Some(SchemaType::Multiple(names)) => {
                    let variants = names
                        .iter()
                        .map(|name| self.resolve_typed(name, schema, key, parent_key))
                        .collect::<Result<Vec<_>>>()?;
                    collapse(variants, TypeDescriptor::Union)
                }
                None if !schema.properties.is_empty() || schema.additional_properties.is_some() => {
                    self.resolve_object(schema, key)?
                }
                None if schema.items.is_some() => self.resolve_typed("array", schema, key, parent_key)?,
                None => TypeDescriptor::Unknown,
            }
        };

        Ok(if schema.nullable {
            nullable(resolved)
        } else {
            resolved
        })
    }

    fn resolve_typed(
        &mut self,
        type_name: &str,
        schema: &Schema,
        key: &str,
        parent_key: &str,
    ) -> Result<TypeDescriptor> {
        match type_name {
            "object" => self.resolve_object(schema, key),
            "array" => {
                let items = self.resolve(schema.items.as_deref(), key, parent_key)?;
                Ok(TypeDescriptor::array_of(items))
            }
            other => Ok(Primitive::from_type_name(other).map_or_else(
                || {
                    tracing::debug!(type_name = other, key, "unrecognized schema type");
                    TypeDescriptor::Unknown
                },
                TypeDescriptor::Primitive,
            )),
        }
    }

    fn resolve_object(&mut self, schema: &Schema, key: &str) -> Result<TypeDescriptor> {
        if schema.properties.is_empty() {
            match &schema.additional_properties {
                Some(AdditionalProperties::Schema(values)) => {
                    let values = self.resolve(Some(&**values), key, key)?;
                    return Ok(TypeDescriptor::Map(Box::new(values)));
                }
                Some(AdditionalProperties::Allowed(true)) => {
                    return Ok(TypeDescriptor::Map(Box::new(TypeDescriptor::Unknown)));
                }
                Some(AdditionalProperties::Allowed(false)) | None => {}
            }
        }
        Ok(TypeDescriptor::Object(self.fields(schema, key)?))
    }

    /// Per-property descriptors; properties outside `required` are optional.
    fn fields(&mut self, schema: &Schema, key: &str) -> Result<Fields> {
        let mut fields = Fields::with_capacity(schema.properties.len());
        for (property, property_schema) in &schema.properties {
            let required = schema.required.iter().any(|r| r == property);
            let resolved = self.resolve(Some(property_schema), property, key)?;
            fields.insert(FieldKey::new(property.as_str(), required), resolved);
        }
        Ok(fields)
    }

    fn resolve_all(
        &mut self,
        schemas: &[RefOr<Schema>],
        key: &str,
        parent_key: &str,
    ) -> Result<Vec<TypeDescriptor>> {
        schemas
            .iter()
            .map(|schema| self.resolve(Some(schema), key, parent_key))
            .collect()
    }
}

fn enum_values(schema: &Schema) -> Option<&[serde_json::Value]> {
    schema.enum_values.as_deref().filter(|values| !values.is_empty())
}

/// Object with properties and no composition keywords.
fn is_plain_object(schema: &Schema) -> bool {
    let typed_object = match &schema.schema_type {
        Some(SchemaType::Single(name)) => name == "object",
        Some(SchemaType::Multiple(_)) => false,
        None => !schema.properties.is_empty(),
    };
    typed_object
        && !schema.properties.is_empty()
        && !schema.nullable
        && schema.all_of.is_empty()
        && schema.one_of.is_empty()
        && schema.any_of.is_empty()
}

/// `ParentKey` + `Key`, or just `Key` when both are the same.
fn enum_name(key: &str, parent_key: &str) -> String {
    if key == parent_key {
        to_capital_case(key)
    } else {
        format!("{}{}", to_capital_case(parent_key), to_capital_case(key))
    }
}

/// A single variant stands for itself.
fn collapse(
    mut variants: Vec<TypeDescriptor>,
    combine: fn(Vec<TypeDescriptor>) -> TypeDescriptor,
) -> TypeDescriptor {
    match variants.len() {
        0 => TypeDescriptor::Unknown,
        1 => variants.swap_remove(0),
        _ => combine(variants),
    }
}

fn nullable(resolved: TypeDescriptor) -> TypeDescriptor {
    let null = TypeDescriptor::Primitive(Primitive::Null);
    match resolved {
        TypeDescriptor::Union(mut variants) => {
            if !variants.contains(&null) {
                variants.push(null);
            }
            TypeDescriptor::Union(variants)
        }
        other if other == null => other,
        other => TypeDescriptor::Union(vec![other, null]),
    }
}
