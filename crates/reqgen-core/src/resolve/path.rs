//! Path table walk: one [`ResolvedOperation`] per (path, method) pair.

use indexmap::IndexMap;

use crate::document::{
    HttpMethod, OpenApi, Operation, Parameter, PathItem, RefOr, RequestBody, Response, Schema,
    Server,
};
use crate::error::Result;

use super::reference::{self, SCHEMAS};
use super::registry::DefinitionRegistry;
use super::schema::SchemaResolver;
use super::types::{FieldKey, Primitive, RequestTypeMap, ResolvedOperation, TypeDescriptor};

const SLASH: &str = "/";

/// Response lookup order: first `(status, media type)` with a schema wins.
const RESPONSE_PREFERENCE: &[(&str, &str)] = &[
    ("200", "application/json"),
    ("200", "*/*"),
    ("201", "application/json"),
];

/// Parameter groups, keyed by exact `in` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamGroup {
    Path,
    Query,
    Body,
    /// `cookie` and swagger 2 `formData`.
    Form,
}

impl ParamGroup {
    fn of(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "body" => Some(Self::Body),
            "cookie" | "formData" => Some(Self::Form),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Grouped<'d> {
    path: Vec<&'d Parameter>,
    query: Vec<&'d Parameter>,
    body: Vec<&'d Parameter>,
    form: Vec<&'d Parameter>,
}

/// Drives resolution over a document's path table.
#[derive(Debug)]
pub struct PathResolver<'d> {
    document: &'d OpenApi,
    base_path: String,
}

impl<'d> PathResolver<'d> {
    #[must_use]
    pub fn new(document: &'d OpenApi) -> Self {
        Self {
            document,
            base_path: base_path(&document.servers),
        }
    }

    /// Resolve every operation, in path-table order.
    ///
    /// Named shapes are registered into `registry` along the way.
    ///
    /// # Errors
    ///
    /// Fails on the first dangling, unsupported, or cyclic reference.
    pub fn resolve(&self, registry: &mut DefinitionRegistry) -> Result<Vec<ResolvedOperation>> {
        let mut schemas = SchemaResolver::new(&self.document.components, registry);
        let mut resolved = Vec::new();

        for (path, item) in &self.document.paths {
            let url = self.url(path);
            for (method, operation) in item.operations() {
                resolved.push(self.resolve_operation(&mut schemas, &url, item, method, operation)?);
            }
        }

        Ok(resolved)
    }

    fn url(&self, path: &str) -> String {
        let request_path = url_template(path);
        if request_path == SLASH && !self.base_path.is_empty() {
            self.base_path.clone()
        } else {
            format!("{}{request_path}", self.base_path)
        }
    }

    fn resolve_operation(
        &self,
        schemas: &mut SchemaResolver<'d, '_>,
        url: &str,
        item: &'d PathItem,
        method: HttpMethod,
        operation: &'d Operation,
    ) -> Result<ResolvedOperation> {
        let operation_id = operation.operation_id.clone().unwrap_or_else(|| {
            tracing::warn!(url, %method, "operation has no operationId");
            String::new()
        });

        let params = self.group_parameters(&operation_id, item, operation)?;

        let mut request_type = RequestTypeMap::new();
        for param in params.path.iter().chain(&params.body).chain(&params.query).chain(&params.form) {
            let resolved = resolve_parameter(schemas, param)?;
            request_type.insert(FieldKey::new(param.name.as_str(), param.required), resolved);
        }

        let mut body_params = names(&params.body);
        if let Some(body) = &operation.request_body {
            let key = format!("{operation_id}Request");
            if self.resolve_request_body(schemas, &key, body, &mut request_type)? {
                body_params.push(key);
            }
        }

        let response_key = format!("{operation_id}Response");
        let response_schema = self.response_schema(&operation.responses)?;
        let response_type = schemas.resolve(response_schema, &response_key, &response_key)?;

        Ok(ResolvedOperation {
            url: url.to_string(),
            method,
            operation_id,
            path_params: names(&params.path),
            query_params: names(&params.query),
            body_params,
            form_data_params: names(&params.form),
            request_type,
            response_type,
        })
    }

    /// Merge path-level and operation-level parameters, then split them by
    /// location. Operation parameters override path-level ones with the
    /// same name and location.
    fn group_parameters(
        &self,
        operation_id: &str,
        item: &'d PathItem,
        operation: &'d Operation,
    ) -> Result<Grouped<'d>> {
        let components = &self.document.components;

        let mut merged: Vec<&'d Parameter> = Vec::new();
        for param in item.parameters.iter().chain(&operation.parameters) {
            let param = reference::parameter(components, param)?;
            match merged
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(slot) => *slot = param,
                None => merged.push(param),
            }
        }

        let mut grouped = Grouped::default();
        for param in merged {
            let Some(group) = ParamGroup::of(&param.location) else {
                tracing::warn!(
                    operation_id,
                    parameter = %param.name,
                    location = %param.location,
                    "unsupported parameter location; parameter dropped"
                );
                continue;
            };
            match group {
                ParamGroup::Path => grouped.path.push(param),
                ParamGroup::Query => grouped.query.push(param),
                ParamGroup::Body => grouped.body.push(param),
                ParamGroup::Form => grouped.form.push(param),
            }
        }
        Ok(grouped)
    }

    /// Write the request body's type under `key`. Returns whether an entry
    /// was written.
    ///
    /// Every media type resolves onto the same key; the last one wins.
    fn resolve_request_body(
        &self,
        schemas: &mut SchemaResolver<'d, '_>,
        key: &str,
        body: &'d RefOr<RequestBody>,
        request_type: &mut RequestTypeMap,
    ) -> Result<bool> {
        if let Some(target) = body.reference() {
            if reference::split(target).is_some_and(|(section, _)| section == SCHEMAS) {
                let resolved = schemas.resolve_reference(target)?;
                request_type.insert(FieldKey::required(key), resolved);
                return Ok(true);
            }
        }

        let body = reference::request_body(&self.document.components, body)?;
        let mut written = false;
        for media in body.content.values() {
            let resolved = schemas.resolve(media.schema.as_ref(), key, key)?;
            request_type.insert(FieldKey::required(key), resolved);
            written = true;
        }
        Ok(written)
    }

    fn response_schema(
        &self,
        responses: &'d IndexMap<String, RefOr<Response>>,
    ) -> Result<Option<&'d RefOr<Schema>>> {
        for (status, media_type) in RESPONSE_PREFERENCE {
            let Some(response) = responses.get(*status) else {
                continue;
            };
            let response = reference::response(&self.document.components, response)?;
            if let Some(schema) = response
                .content
                .get(*media_type)
                .and_then(|media| media.schema.as_ref())
            {
                return Ok(Some(schema));
            }
        }
        Ok(None)
    }
}

fn resolve_parameter(schemas: &mut SchemaResolver<'_, '_>, param: &Parameter) -> Result<TypeDescriptor> {
    match &param.schema {
        Some(schema) => schemas.resolve(Some(schema), &param.name, &param.name),
        None => Ok(param
            .param_type
            .as_deref()
            .and_then(Primitive::from_type_name)
            .map_or(TypeDescriptor::Unknown, TypeDescriptor::Primitive)),
    }
}

fn names(params: &[&Parameter]) -> Vec<String> {
    params.iter().map(|p| p.name.clone()).collect()
}

/// Base path from the first server: its URL path without the first segment.
///
/// `https://host/api/v1` → `/v1`; a URL with nothing left yields `""`.
#[must_use]
pub fn base_path(servers: &[Server]) -> String {
    let Some(server) = servers.first() else {
        return String::new();
    };
    let url = server.url.as_str();
    let path = match url.split_once("://") {
        Some((_, authority_and_path)) => authority_and_path
            .find('/')
            .map_or("", |start| &authority_and_path[start..]),
        None => url,
    };

    let kept: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .skip(1)
        .collect();
    if kept.is_empty() {
        String::new()
    } else {
        format!("{SLASH}{}", kept.join(SLASH))
    }
}

/// Mark path parameters as template placeholders: `/pets/{id}` → `/pets/${id}`.
#[must_use]
pub fn url_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') {
                format!("${segment}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(SLASH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servers(url: &str) -> Vec<Server> {
        vec![Server {
            url: url.to_string(),
        }]
    }

    #[test]
    fn base_path_drops_first_segment() {
        assert_eq!(base_path(&servers("https://host/api/v1")), "/v1");
        assert_eq!(base_path(&servers("https://host/api/v1/")), "/v1");
        assert_eq!(base_path(&servers("/api/v2/beta")), "/v2/beta");
    }

    #[test]
    fn base_path_empty_when_nothing_remains() {
        assert_eq!(base_path(&servers("https://host")), "");
        assert_eq!(base_path(&servers("https://host/")), "");
        assert_eq!(base_path(&servers("https://host/api")), "");
        assert_eq!(base_path(&[]), "");
    }

    #[test]
    fn url_template_marks_only_placeholders() {
        assert_eq!(url_template("/pets/{petId}/toys/{toyId}"), "/pets/${petId}/toys/${toyId}");
        assert_eq!(url_template("/store/inventory"), "/store/inventory");
        assert_eq!(url_template("/"), "/");
    }

    #[test]
    fn root_path_is_not_doubled() {
        let document = OpenApi {
            servers: servers("https://host/api/v1"),
            ..OpenApi::default()
        };
        let resolver = PathResolver::new(&document);
        assert_eq!(resolver.url("/"), "/v1");
        assert_eq!(resolver.url("/pets"), "/v1/pets");

        let bare = OpenApi::default();
        assert_eq!(PathResolver::new(&bare).url("/"), "/");
    }

    #[test]
    fn parameter_groups_match_exactly() {
        assert_eq!(ParamGroup::of("path"), Some(ParamGroup::Path));
        assert_eq!(ParamGroup::of("cookie"), Some(ParamGroup::Form));
        assert_eq!(ParamGroup::of("formData"), Some(ParamGroup::Form));
        assert_eq!(ParamGroup::of("header"), None);
        assert_eq!(ParamGroup::of("Query"), None);
    }
}
