//! Shared list HTTP handlers.
//!
//! ```text
//! GET    /api/v1/lists?categoryId=
//! POST   /api/v1/lists
//! PUT    /api/v1/lists/{id}
//! DELETE /api/v1/lists/{id}
//! POST   /api/v1/lists/{id}/collaborators
//! DELETE /api/v1/lists/{id}/collaborators/{uid}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CategoryId, CategoryRef, CollaboratorRef, Error, ListId, ListPatch, NewList,
    apply_show_public,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, Viewer};
use crate::inbound::http::schemas::{ErrorSchema, ListResponse, ListViewResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_id, parse_optional_id, parse_uid,
};

const LIST_ID: FieldName = FieldName::new("listId");
const CATEGORY_ID: FieldName = FieldName::new("categoryId");
const TITLE: FieldName = FieldName::new("title");
const UID: FieldName = FieldName::new("uid");

/// Query parameters for listing visible lists.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListsFilter {
    /// Only return lists in this category.
    pub category_id: Option<String>,
    /// When `false`, drop public lists the caller neither owns nor
    /// collaborates on. Stored preferences are never applied here.
    pub show_public: Option<bool>,
}

/// Request payload for creating a list.
///
/// `categoryId` wins over `categoryName`; with neither, the list lands in
/// the fallback category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub is_public: Option<bool>,
}

/// Request payload for changing list metadata.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListRequest {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub is_public: Option<bool>,
}

/// Request payload for inviting a collaborator by uid or email.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCollaboratorRequest {
    pub uid: Option<String>,
    pub email: Option<String>,
}

fn parse_create_request(payload: CreateListRequest) -> Result<NewList, Error> {
    let title = payload.title.ok_or_else(|| missing_field_error(TITLE))?;
    let category = match parse_optional_id::<CategoryId>(payload.category_id.as_deref(), CATEGORY_ID)? {
        Some(id) => CategoryRef::Id(id),
        None => CategoryRef::Name(payload.category_name.unwrap_or_default()),
    };
    Ok(NewList {
        title,
        category,
        is_public: payload.is_public.unwrap_or(false),
    })
}

fn parse_update_request(payload: UpdateListRequest) -> Result<ListPatch, Error> {
    Ok(ListPatch {
        title: payload.title,
        category_id: parse_optional_id(payload.category_id.as_deref(), CATEGORY_ID)?,
        is_public: payload.is_public,
    })
}

fn parse_collaborator(payload: AddCollaboratorRequest) -> Result<CollaboratorRef, Error> {
    match (payload.uid, payload.email) {
        (Some(uid), _) => parse_uid(uid, UID).map(CollaboratorRef::Uid),
        (None, Some(email)) if !email.trim().is_empty() => {
            Ok(CollaboratorRef::Email(email.trim().to_owned()))
        }
        (None, _) => Err(missing_field_error(UID)),
    }
}

/// List every list visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/lists",
    params(ListsFilter),
    responses(
        (status = 200, description = "Visible lists with owner and category details", body = [ListViewResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "listVisibleLists",
    security((), ("BearerToken" = []))
)]
#[get("/lists")]
pub async fn list_lists(
    state: web::Data<HttpState>,
    viewer: Viewer,
    query: web::Query<ListsFilter>,
) -> ApiResult<web::Json<Vec<ListViewResponse>>> {
    let category = parse_optional_id(query.category_id.as_deref(), CATEGORY_ID)?;
    let viewer = viewer.into_uid();
    let views = state
        .lists_query
        .lists_visible_to(viewer.clone(), category)
        .await?;
    let views = apply_show_public(views, viewer.as_ref(), query.show_public.unwrap_or(true));
    Ok(web::Json(
        views.into_iter().map(ListViewResponse::from).collect(),
    ))
}

/// Create a list owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/lists",
    request_body = CreateListRequest,
    responses(
        (status = 201, description = "Created list", body = ListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "createList"
)]
#[post("/lists")]
pub async fn create_list(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<CreateListRequest>,
) -> ApiResult<HttpResponse> {
    let new_list = parse_create_request(payload.into_inner())?;
    let list = state.lists.create(new_list, auth.uid()).await?;
    Ok(HttpResponse::Created().json(ListResponse::from(list)))
}

/// Change a list's title, category, or visibility; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/lists/{id}",
    params(("id" = String, Path, description = "List id")),
    request_body = UpdateListRequest,
    responses(
        (status = 200, description = "Updated list", body = ListResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "updateList"
)]
#[put("/lists/{id}")]
pub async fn update_list(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<UpdateListRequest>,
) -> ApiResult<web::Json<ListResponse>> {
    let id: ListId = parse_id(&path.into_inner(), LIST_ID)?;
    let patch = parse_update_request(payload.into_inner())?;
    let list = state.lists.update(&id, patch, auth.uid()).await?;
    Ok(web::Json(ListResponse::from(list)))
}

/// Delete a list and its items.
#[utoipa::path(
    delete,
    path = "/api/v1/lists/{id}",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 204, description = "List and items removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "deleteList"
)]
#[delete("/lists/{id}")]
pub async fn delete_list(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: ListId = parse_id(&path.into_inner(), LIST_ID)?;
    state.lists.delete(&id, auth.uid()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Grant a user edit rights on a list; owner only.
#[utoipa::path(
    post,
    path = "/api/v1/lists/{id}/collaborators",
    params(("id" = String, Path, description = "List id")),
    request_body = AddCollaboratorRequest,
    responses(
        (status = 200, description = "Updated list", body = ListResponse),
        (status = 400, description = "Invalid request or unknown email", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "addCollaborator"
)]
#[post("/lists/{id}/collaborators")]
pub async fn add_collaborator(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<String>,
    payload: web::Json<AddCollaboratorRequest>,
) -> ApiResult<web::Json<ListResponse>> {
    let id: ListId = parse_id(&path.into_inner(), LIST_ID)?;
    let collaborator = parse_collaborator(payload.into_inner())?;
    let list = state
        .lists
        .add_collaborator(&id, auth.uid(), collaborator)
        .await?;
    Ok(web::Json(ListResponse::from(list)))
}

/// Revoke a collaborator's edit rights; owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/lists/{id}/collaborators/{uid}",
    params(
        ("id" = String, Path, description = "List id"),
        ("uid" = String, Path, description = "Collaborator uid")
    ),
    responses(
        (status = 200, description = "Updated list", body = ListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lists"],
    operation_id = "removeCollaborator"
)]
#[delete("/lists/{id}/collaborators/{uid}")]
pub async fn remove_collaborator(
    state: web::Data<HttpState>,
    auth: Authenticated,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ListResponse>> {
    let (raw_id, raw_uid) = path.into_inner();
    let id: ListId = parse_id(&raw_id, LIST_ID)?;
    let target = parse_uid(raw_uid, UID)?;
    let list = state
        .lists
        .remove_collaborator(&id, auth.uid(), &target)
        .await?;
    Ok(web::Json(ListResponse::from(list)))
}

#[cfg(test)]
#[path = "lists_tests.rs"]
mod tests;
