//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` endpoint and the health probes, the
//! response schemas from [`crate::inbound::http::schemas`], and the bearer
//! token security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::categories::CategoryNameRequest;
use crate::inbound::http::items::{CreateItemRequest, ToggleDoneRequest, UpdateItemRequest};
use crate::inbound::http::lists::{AddCollaboratorRequest, CreateListRequest, UpdateListRequest};
use crate::inbound::http::preferences::PreferencesRequest;
use crate::inbound::http::schemas::{
    CategoryResponse, ErrorCodeSchema, ErrorSchema, ItemResponse, ListResponse, ListViewResponse,
    PreferencesResponse, ProfileResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the identity provider bearer token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("ID token issued by the identity provider."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Listshare API",
        description = "Shared lists with categories, collaborators, and per-user completion."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::rename_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::lists::list_lists,
        crate::inbound::http::lists::create_list,
        crate::inbound::http::lists::update_list,
        crate::inbound::http::lists::delete_list,
        crate::inbound::http::lists::add_collaborator,
        crate::inbound::http::lists::remove_collaborator,
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::toggle_done,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::preferences::get_preferences,
        crate::inbound::http::preferences::update_preferences,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CategoryResponse,
        ListResponse,
        ListViewResponse,
        ProfileResponse,
        ItemResponse,
        PreferencesResponse,
        CategoryNameRequest,
        CreateListRequest,
        UpdateListRequest,
        AddCollaboratorRequest,
        CreateItemRequest,
        ToggleDoneRequest,
        UpdateItemRequest,
        PreferencesRequest,
    )),
    tags(
        (name = "categories", description = "Shared category directory"),
        (name = "lists", description = "Lists, visibility, and collaborators"),
        (name = "items", description = "List items and per-user completion"),
        (name = "preferences", description = "Per-user display preferences"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn every_api_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/categories",
            "/api/v1/categories/{id}",
            "/api/v1/lists",
            "/api/v1/lists/{id}",
            "/api/v1/lists/{id}/collaborators",
            "/api/v1/lists/{id}/collaborators/{uid}",
            "/api/v1/lists/{id}/items",
            "/api/v1/items/{id}",
            "/api/v1/items/{id}/done",
            "/api/v1/preferences",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
