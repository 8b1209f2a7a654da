//! List item HTTP handlers.
//!
//! ```text
//! GET    /api/v1/lists/{id}/items
//! POST   /api/v1/lists/{id}/items
//! PUT    /api/v1/items/{id}/done
//! PATCH  /api/v1/items/{id}
//! DELETE /api/v1/items/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ItemId, ItemPatch, ListId, NewItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, Viewer};
use crate::inbound::http::schemas::{ErrorSchema, ItemResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_id};

const LIST_ID: FieldName = FieldName::new("listId");
const ITEM_ID: FieldName = FieldName::new("itemId");
const TEXT: FieldName = FieldName::new("text");
const DONE: FieldName = FieldName::new("done");

/// Request payload for adding an item.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub text: Option<String>,
    /// Blank or absent means the default sub-category.
    pub sub_category: Option<String>,
}

/// Request payload for toggling the caller's completion flag.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleDoneRequest {
    pub done: Option<bool>,
}

/// Request payload for editing item fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub text: Option<String>,
    pub sub_category: Option<String>,
}

fn parse_new_item(payload: CreateItemRequest) -> Result<NewItem, Error> {
    let text = payload.text.ok_or_else(|| missing_field_error(TEXT))?;
    Ok(NewItem {
        text,
        sub_category: payload.sub_category,
    })
}

/// List a list's items with the caller's completion flags.
#[utoipa::path(
    get,
    path = "/api/v1/lists/{id}/items",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "Items in creation order", body = [ItemResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "List is not visible", body = ErrorSchema),
        (status = 404, description = "List not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems",
    security((), ("BearerToken" = []))
)]
#[get("/lists/{id}/items")]
pub async fn list_items(
    state: web::Data<HttpState>,
    viewer: Viewer,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ItemResponse>>> {
    let list_id: ListId = parse_id(&path.into_inner(), LIST_ID)?;
    let items = state
        .items
        .list_for_viewer(&list_id, viewer.into_uid())
        .await?;
    Ok(web::Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Add an item to a list the caller can edit.
#[utoipa::path(
    post,
    path = "/api/v1/lists/{id}/items",
    params(("id" = String, Path, description = "List id")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Created item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller cannot edit the list", body = ErrorSchema),
        (status = 404, description = "List not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/lists/{id}/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let list_id: ListId = parse_id(&path.into_inner(), LIST_ID)?;
    let new_item = parse_new_item(payload.into_inner())?;
    let item = state.items.create(&list_id, new_item, auth.uid()).await?;
    Ok(HttpResponse::Created().json(ItemResponse::from(item)))
}

/// Mark an item done or not done for the caller only.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}/done",
    params(("id" = String, Path, description = "Item id")),
    request_body = ToggleDoneRequest,
    responses(
        (status = 200, description = "Item with the caller's new flag", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller cannot edit the list", body = ErrorSchema),
        (status = 404, description = "Item not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "toggleItemDone"
)]
#[put("/items/{id}/done")]
pub async fn toggle_done(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ToggleDoneRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let item_id: ItemId = parse_id(&path.into_inner(), ITEM_ID)?;
    let done = payload.done.ok_or_else(|| missing_field_error(DONE))?;
    let item = state.items.toggle_done(&item_id, auth.uid(), done).await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Edit an item's text or sub-category; creator only.
#[utoipa::path(
    patch,
    path = "/api/v1/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller did not create the item", body = ErrorSchema),
        (status = 404, description = "Item not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[patch("/items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<ItemResponse>> {
    let item_id: ItemId = parse_id(&path.into_inner(), ITEM_ID)?;
    let UpdateItemRequest { text, sub_category } = payload.into_inner();
    let item = state
        .items
        .update_fields(&item_id, auth.uid(), ItemPatch { text, sub_category })
        .await?;
    Ok(web::Json(ItemResponse::from(item)))
}

/// Delete an item; its creator or the admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Item not found", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[delete("/items/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let item_id: ItemId = parse_id(&path.into_inner(), ITEM_ID)?;
    state.items.delete(&item_id, auth.uid()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
