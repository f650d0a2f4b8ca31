//! Fixture tests for the full resolution pass.
//!
//! Each test parses a small YAML description and checks the resolved
//! operations and registry produced by [`reqgen_core::resolve_document`].

use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::json;

use reqgen_core::{
    resolve_document, Definition, Error, FieldKey, Fields, HttpMethod, OpenApi, PathResolver,
    Primitive, RequestTypeMap, Resolution, ResolvedOperation, TypeDescriptor, DefinitionRegistry,
};

const PETSTORE: &str = indoc! {r##"
    openapi: 3.0.3
    info:
      title: Petstore
      version: 1.0.0
    servers:
      - url: https://petstore.example.com/api/v1
    paths:
      /pets:
        get:
          operationId: listPets
          parameters:
            - name: limit
              in: query
              schema:
                type: integer
            - name: status
              in: query
              required: true
              schema:
                type: string
                enum: [available, sold]
            - name: X-Trace
              in: header
              schema:
                type: string
          responses:
            '200':
              description: ok
              content:
                application/json:
                  schema:
                    type: array
                    items:
                      $ref: '#/components/schemas/Pet'
        post:
          operationId: addPet
          requestBody:
            content:
              application/json:
                schema:
                  $ref: '#/components/schemas/NewPet'
          responses:
            '201':
              description: created
              content:
                application/json:
                  schema:
                    $ref: '#/components/schemas/Pet'
      /pets/{petId}:
        parameters:
          - name: petId
            in: path
            required: true
            schema:
              type: integer
        get:
          operationId: showPetById
          responses:
            '200':
              description: ok
              content:
                '*/*':
                  schema:
                    $ref: '#/components/schemas/Pet'
        delete:
          operationId: deletePet
          responses:
            '204':
              description: gone
    components:
      schemas:
        Pet:
          type: object
          required: [id, name]
          properties:
            id: {type: integer}
            name: {type: string}
            tag: {type: string}
        NewPet:
          type: object
          required: [name]
          properties:
            name: {type: string}
            kind:
              type: string
              enum: [cat, dog]
"##};

fn parse(yaml: &str) -> OpenApi {
    serde_yaml_ng::from_str(yaml).expect("fixture should parse")
}

fn resolve(yaml: &str) -> Resolution {
    resolve_document(&parse(yaml)).expect("resolution should succeed")
}

fn named(name: &str) -> TypeDescriptor {
    TypeDescriptor::Named(name.to_string())
}

fn number() -> TypeDescriptor {
    Primitive::Number.into()
}

fn string() -> TypeDescriptor {
    Primitive::String.into()
}

fn request_type(entries: Vec<(FieldKey, TypeDescriptor)>) -> RequestTypeMap {
    entries.into_iter().collect()
}

fn find<'a>(resolution: &'a Resolution, operation_id: &str) -> &'a ResolvedOperation {
    resolution
        .operations
        .iter()
        .find(|op| op.operation_id == operation_id)
        .unwrap_or_else(|| panic!("operation {operation_id} missing"))
}

#[test]
fn operations_sorted_by_operation_id() {
    let resolution = resolve(PETSTORE);
    let ids: Vec<&str> = resolution
        .operations
        .iter()
        .map(|op| op.operation_id.as_str())
        .collect();
    assert_eq!(ids, vec!["addPet", "deletePet", "listPets", "showPetById"]);
}

#[test]
fn path_resolver_keeps_path_table_order() {
    let document = parse(PETSTORE);
    let mut registry = DefinitionRegistry::new();
    let operations = PathResolver::new(&document).resolve(&mut registry).unwrap();
    let ids: Vec<&str> = operations.iter().map(|op| op.operation_id.as_str()).collect();
    assert_eq!(ids, vec!["listPets", "addPet", "showPetById", "deletePet"]);
}

#[test]
fn query_parameters_and_enums() {
    let resolution = resolve(PETSTORE);
    let op = find(&resolution, "listPets");

    assert_eq!(
        *op,
        ResolvedOperation {
            url: "/v1/pets".to_string(),
            method: HttpMethod::Get,
            operation_id: "listPets".to_string(),
            path_params: vec![],
            query_params: vec!["limit".to_string(), "status".to_string()],
            body_params: vec![],
            form_data_params: vec![],
            request_type: request_type(vec![
                (FieldKey::new("limit", false), number()),
                (FieldKey::new("status", true), named("Status")),
            ]),
            response_type: TypeDescriptor::array_of(named("Pet")),
        }
    );
    assert_eq!(
        resolution.definitions.get("Status"),
        Some(&Definition::Enum(vec![json!("available"), json!("sold")]))
    );
}

#[test]
fn request_body_reference_and_created_response() {
    let resolution = resolve(PETSTORE);
    let op = find(&resolution, "addPet");

    assert_eq!(op.method, HttpMethod::Post);
    assert_eq!(op.body_params, vec!["addPetRequest"]);
    assert_eq!(
        op.request_type,
        request_type(vec![(FieldKey::required("addPetRequest"), named("NewPet"))])
    );
    assert_eq!(op.response_type, named("Pet"));
}

#[test]
fn path_level_parameters_and_wildcard_response() {
    let resolution = resolve(PETSTORE);

    let show = find(&resolution, "showPetById");
    assert_eq!(show.url, "/v1/pets/${petId}");
    assert_eq!(show.path_params, vec!["petId"]);
    assert_eq!(
        show.request_type,
        request_type(vec![(FieldKey::required("petId"), number())])
    );
    assert_eq!(show.response_type, named("Pet"));

    let delete = find(&resolution, "deletePet");
    assert_eq!(delete.method, HttpMethod::Delete);
    assert_eq!(delete.path_params, vec!["petId"]);
    assert_eq!(delete.response_type, TypeDescriptor::Unknown);
}

#[test]
fn registry_holds_each_named_shape_once() {
    let resolution = resolve(PETSTORE);
    let names: Vec<&str> = resolution
        .definitions
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["NewPet", "NewPetKind", "Pet", "Status"]);

    let mut pet = Fields::new();
    pet.insert(FieldKey::new("id", true), number());
    pet.insert(FieldKey::new("name", true), string());
    pet.insert(FieldKey::new("tag", false), string());
    assert_eq!(resolution.definitions.get("Pet"), Some(&Definition::Object(pet)));

    let mut new_pet = Fields::new();
    new_pet.insert(FieldKey::new("name", true), string());
    new_pet.insert(FieldKey::new("kind", false), named("NewPetKind"));
    assert_eq!(
        resolution.definitions.get("NewPet"),
        Some(&Definition::Object(new_pet))
    );
}

#[test]
fn resolving_twice_is_identical() {
    let document = parse(PETSTORE);
    let first = resolve_document(&document).unwrap();
    let second = resolve_document(&document).unwrap();
    assert_eq!(first, second);
}

#[test]
fn created_response_used_when_no_ok_response() {
    let resolution = resolve(indoc! {r"
        paths:
          /tokens:
            post:
              operationId: createToken
              responses:
                '201':
                  description: created
                  content:
                    application/json:
                      schema:
                        type: string
    "});
    assert_eq!(resolution.operations[0].response_type, string());
}

#[test]
fn inline_body_media_types_collapse_last_wins() {
    let resolution = resolve(indoc! {r"
        paths:
          /upload:
            put:
              operationId: upload
              requestBody:
                content:
                  application/json:
                    schema:
                      type: string
                  application/octet-stream:
                    schema:
                      type: integer
              responses: {}
    "});
    let op = &resolution.operations[0];
    assert_eq!(op.body_params, vec!["uploadRequest"]);
    assert_eq!(
        op.request_type,
        request_type(vec![(FieldKey::required("uploadRequest"), number())])
    );
}

#[test]
fn inline_body_object_with_enum_property() {
    let resolution = resolve(indoc! {r"
        paths:
          /orders:
            post:
              operationId: placeOrder
              requestBody:
                content:
                  application/json:
                    schema:
                      type: object
                      required: [sku]
                      properties:
                        sku: {type: string}
                        priority:
                          type: string
                          enum: [low, high]
              responses: {}
    "});

    let mut body = Fields::new();
    body.insert(FieldKey::new("sku", true), string());
    body.insert(FieldKey::new("priority", false), named("PlaceOrderRequestPriority"));
    assert_eq!(
        resolution.operations[0].request_type,
        request_type(vec![(
            FieldKey::required("placeOrderRequest"),
            TypeDescriptor::Object(body)
        )])
    );
    assert!(resolution.definitions.contains("PlaceOrderRequestPriority"));
}

#[test]
fn component_request_bodies_and_parameters_are_followed() {
    let resolution = resolve(indoc! {r##"
        servers:
          - url: https://api.example.com
        paths:
          /:
            post:
              operationId: submit
              parameters:
                - $ref: '#/components/parameters/Verbose'
              requestBody:
                $ref: '#/components/requestBodies/Submission'
              responses:
                '200':
                  $ref: '#/components/responses/Ack'
        components:
          parameters:
            Verbose:
              name: verbose
              in: query
              schema: {type: boolean}
          requestBodies:
            Submission:
              content:
                application/json:
                  schema: {type: string}
          responses:
            Ack:
              description: ack
              content:
                application/json:
                  schema: {type: boolean}
    "##});

    let op = &resolution.operations[0];
    assert_eq!(op.url, "/");
    assert_eq!(op.query_params, vec!["verbose"]);
    assert_eq!(
        op.request_type,
        request_type(vec![
            (FieldKey::new("verbose", false), Primitive::Boolean.into()),
            (FieldKey::required("submitRequest"), string()),
        ])
    );
    assert_eq!(op.response_type, TypeDescriptor::Primitive(Primitive::Boolean));
}

#[test]
fn form_parameters_fall_back_to_inline_type() {
    let resolution = resolve(indoc! {r"
        paths:
          /avatar:
            post:
              operationId: uploadAvatar
              parameters:
                - name: file
                  in: formData
                  required: true
                  type: file
                - name: session
                  in: cookie
                  schema: {type: string}
              responses: {}
    "});
    let op = &resolution.operations[0];
    assert_eq!(op.form_data_params, vec!["file", "session"]);
    assert_eq!(
        op.request_type,
        request_type(vec![
            (FieldKey::required("file"), Primitive::File.into()),
            (FieldKey::new("session", false), string()),
        ])
    );
}

#[test]
fn missing_operation_id_still_resolves() {
    let resolution = resolve(indoc! {r"
        paths:
          /ping:
            get:
              responses: {}
    "});
    let op = &resolution.operations[0];
    assert_eq!(op.operation_id, "");
    assert_eq!(op.response_type, TypeDescriptor::Unknown);
}

#[test]
fn dangling_reference_fails_the_pass() {
    let document = parse(indoc! {r##"
        paths:
          /pets:
            get:
              operationId: listPets
              responses:
                '200':
                  description: ok
                  content:
                    application/json:
                      schema:
                        $ref: '#/components/schemas/Missing'
    "##});
    let err = resolve_document(&document).unwrap_err();
    assert!(matches!(err, Error::DanglingReference { ref reference } if reference == "#/components/schemas/Missing"));
}

#[test]
fn external_reference_is_unsupported() {
    let document = parse(indoc! {r"
        paths:
          /pets:
            get:
              operationId: listPets
              parameters:
                - $ref: 'common.yaml#/Limit'
              responses: {}
    "});
    assert!(matches!(
        resolve_document(&document),
        Err(Error::UnsupportedReference { section: "parameters", .. })
    ));
}
