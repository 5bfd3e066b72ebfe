//! OpenAPI document served at `/api-docs`.
//!
//! Static parts (info, tags, payload schemas) come from the derive; the five
//! operations of every resource are generated from its [`Resource`] impl so
//! the document cannot drift from the routes.

use crate::model::{Product, ProductResource, Resource, User, UserResource};
use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn,
    PathItemBuilder,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::schema::{Array, ObjectBuilder, Ref, Schema, SchemaType, Type};
use utoipa::openapi::{
    Content, ContentBuilder, OpenApi, PathsBuilder, RefOr, Required, Response,
    ResponseBuilder, Server,
};
use utoipa::ToSchema;

#[derive(utoipa::OpenApi)]
#[openapi(
    info(title = "Rest API", description = "A simple rest API"),
    components(schemas(Product, User)),
    tags(
        (name = "Product", description = "Product management"),
        (name = "User", description = "User management")
    )
)]
struct ApiDoc;

pub fn api_doc(public_url: &str) -> OpenApi {
    let mut doc = <ApiDoc as utoipa::OpenApi>::openapi();
    let paths = PathsBuilder::new();
    let paths = resource_paths::<ProductResource>(paths);
    let paths = resource_paths::<UserResource>(paths);
    doc.paths = paths.build();
    doc.servers = Some(vec![Server::new(public_url)]);
    doc
}

fn payload_ref<R: Resource>() -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(<R::Payload as ToSchema>::name()))
}

fn content(schema: RefOr<Schema>) -> Content {
    ContentBuilder::new().schema(Some(schema)).build()
}

fn text_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::new(Type::String))
            .build(),
    ))
}

fn ok_json(description: String, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", content(schema))
        .build()
}

fn bare(description: String) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn not_found<R: Resource>() -> Response {
    ResponseBuilder::new()
        .description(format!("{} with the given Id couldn't be found", R::TAG))
        .content("text/plain", content(text_schema()))
        .build()
}

fn id_param<R: Resource>() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("Id of the {}", R::NAME)))
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::new(Type::Integer))
                .build(),
        ))))
        .build()
}

fn payload_body<R: Resource>() -> RequestBody {
    RequestBodyBuilder::new()
        .description(Some(format!("Fields of the {}", R::NAME)))
        .content("application/json", content(payload_ref::<R>()))
        .content("application/x-www-form-urlencoded", content(payload_ref::<R>()))
        .required(Some(Required::True))
        .build()
}

fn operation<R: Resource>(id: &str, description: String) -> OperationBuilder {
    OperationBuilder::new()
        .tags(Some(vec![R::TAG.to_string()]))
        .operation_id(Some(format!("{}_{}", id, R::NAME)))
        .description(Some(description))
}

fn collection_operations<R: Resource>() -> (Operation, Operation) {
    let name = R::NAME;
    let list = operation::<R>("list", format!("Use to return all {}", name))
        .response(
            "200",
            ok_json(
                format!("Successfully returned all {}", name),
                RefOr::T(Schema::Array(Array::new(payload_ref::<R>()))),
            ),
        )
        .response("500", bare(format!("Failed to query for {}", name)))
        .build();
    let create = operation::<R>("create", format!("Use to insert a new {}", name))
        .request_body(Some(payload_body::<R>()))
        .response(
            "200",
            ok_json(format!("Successfully inserted a {}", name), payload_ref::<R>()),
        )
        .response("500", bare(format!("Failed to insert a {}", name)))
        .build();
    (list, create)
}

fn item_operations<R: Resource>() -> (Operation, Operation, Operation) {
    let name = R::NAME;
    let read = operation::<R>("read", format!("Use to return a {}", name))
        .parameter(id_param::<R>())
        .response(
            "200",
            ok_json(
                format!("Successfully returned the {}", name),
                RefOr::T(Schema::Array(Array::new(payload_ref::<R>()))),
            ),
        )
        .response("404", not_found::<R>())
        .response("500", bare(format!("Failed to query for {}", name)))
        .build();
    let update = operation::<R>("update", format!("Use to update a {}", name))
        .parameter(id_param::<R>())
        .request_body(Some(payload_body::<R>()))
        .response(
            "200",
            ok_json(format!("Successfully updated the {}", name), payload_ref::<R>()),
        )
        .response("404", not_found::<R>())
        .response("500", bare(format!("Failed to update the {}", name)))
        .build();
    let delete = operation::<R>("delete", format!("Use to delete a {}", name))
        .parameter(id_param::<R>())
        .response("200", bare(format!("Successfully deleted the {}", name)))
        .response("404", not_found::<R>())
        .response("500", bare(format!("Failed to delete the {}", name)))
        .build();
    (read, update, delete)
}

fn resource_paths<R: Resource>(paths: PathsBuilder) -> PathsBuilder {
    let (list, create) = collection_operations::<R>();
    let (read, update, delete) = item_operations::<R>();
    paths
        .path(
            format!("/{}", R::NAME),
            PathItemBuilder::new()
                .operation(HttpMethod::Get, list)
                .operation(HttpMethod::Post, create)
                .build(),
        )
        .path(
            format!("/{}/{{id}}", R::NAME),
            PathItemBuilder::new()
                .operation(HttpMethod::Get, read)
                .operation(HttpMethod::Put, update)
                .operation(HttpMethod::Delete, delete)
                .build(),
        )
}
