//! Category HTTP handlers.
//!
//! ```text
//! GET    /api/v1/categories
//! POST   /api/v1/categories
//! PUT    /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CategoryId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{CategoryResponse, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_id};

const CATEGORY_ID: FieldName = FieldName::new("categoryId");
const NAME: FieldName = FieldName::new("name");

/// Request payload naming a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNameRequest {
    pub name: Option<String>,
}

/// List all public categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Public categories ordered by name", body = [CategoryResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.categories.list_public().await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Return the category with the given name, creating it when absent.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryNameRequest,
    responses(
        (status = 201, description = "Resolved or created category", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Concurrent creation could not be resolved", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "resolveCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CategoryNameRequest>,
) -> ApiResult<HttpResponse> {
    let name = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error(NAME))?;
    let category = state
        .categories
        .resolve_or_create(&name, auth.uid())
        .await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// Rename a category; owner or admin only.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = CategoryNameRequest,
    responses(
        (status = 200, description = "Renamed category", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already used", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "renameCategory"
)]
#[put("/categories/{id}")]
pub async fn rename_category(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<CategoryNameRequest>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let id: CategoryId = parse_id(&path.into_inner(), CATEGORY_ID)?;
    let name = payload
        .into_inner()
        .name
        .ok_or_else(|| missing_field_error(NAME))?;
    let category = state.categories.rename(&id, &name, auth.uid()).await?;
    Ok(web::Json(CategoryResponse::from(category)))
}

/// Remove a category; admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "removeCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: CategoryId = parse_id(&path.into_inner(), CATEGORY_ID)?;
    state.categories.remove(&id, auth.uid()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
