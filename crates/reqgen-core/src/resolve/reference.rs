//! Local `#/components/<section>/<name>` reference lookup.

use std::borrow::Cow;
use std::collections::HashSet;

use indexmap::IndexMap;

use crate::document::{Components, Parameter, RefOr, RequestBody, Response};
use crate::error::{Error, Result};

const COMPONENTS_PREFIX: &str = "#/components/";

pub(crate) const SCHEMAS: &str = "schemas";
pub(crate) const PARAMETERS: &str = "parameters";
pub(crate) const REQUEST_BODIES: &str = "requestBodies";
pub(crate) const RESPONSES: &str = "responses";

/// Split a local reference into its section and unescaped component name.
pub(crate) fn split(reference: &str) -> Option<(&str, Cow<'_, str>)> {
    let rest = reference.strip_prefix(COMPONENTS_PREFIX)?;
    let (section, name) = rest.split_once('/')?;
    if section.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((section, unescape(name)))
}

/// Component name of a reference that must target `section`.
pub(crate) fn component_name<'r>(reference: &'r str, section: &'static str) -> Result<Cow<'r, str>> {
    match split(reference) {
        Some((found, name)) if found == section => Ok(name),
        _ => Err(Error::UnsupportedReference {
            reference: reference.to_string(),
            section,
        }),
    }
}

/// JSON pointer token unescaping (`~1` → `/`, `~0` → `~`).
fn unescape(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}

pub(crate) fn parameter<'d>(
    components: &'d Components,
    item: &'d RefOr<Parameter>,
) -> Result<&'d Parameter> {
    follow(PARAMETERS, &components.parameters, item)
}

pub(crate) fn request_body<'d>(
    components: &'d Components,
    item: &'d RefOr<RequestBody>,
) -> Result<&'d RequestBody> {
    follow(REQUEST_BODIES, &components.request_bodies, item)
}

pub(crate) fn response<'d>(
    components: &'d Components,
    item: &'d RefOr<Response>,
) -> Result<&'d Response> {
    follow(RESPONSES, &components.responses, item)
}

/// Follow a chain of references inside one section until an inline value.
fn follow<'d, T>(
    section: &'static str,
    table: &'d IndexMap<String, RefOr<T>>,
    item: &'d RefOr<T>,
) -> Result<&'d T> {
    let mut current = item;
    let mut seen = HashSet::new();
    loop {
        let reference = match current {
            RefOr::Item(value) => return Ok(value),
            RefOr::Ref { reference } => reference,
        };
        if !seen.insert(reference.as_str()) {
            return Err(Error::ReferenceCycle {
                reference: reference.clone(),
            });
        }
        let name = component_name(reference, section)?;
        current = table
            .get(name.as_ref())
            .ok_or_else(|| Error::DanglingReference {
                reference: reference.clone(),
            })?;
    }
}
