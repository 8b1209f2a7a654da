//! User preferences HTTP handlers.
//!
//! ```text
//! GET /api/v1/preferences
//! PUT /api/v1/preferences
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::UpdatePreferencesRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, PreferencesResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const SHOW_PUBLIC: FieldName = FieldName::new("showPublic");

/// Request payload for updating preferences.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub show_public: Option<bool>,
}

/// Fetch the caller's preferences, creating defaults on first access.
#[utoipa::path(
    get,
    path = "/api/v1/preferences",
    responses(
        (status = 200, description = "Stored preferences", body = PreferencesResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "getPreferences"
)]
#[get("/preferences")]
pub async fn get_preferences(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<PreferencesResponse>> {
    let preferences = state.preferences_query.fetch_preferences(auth.uid()).await?;
    Ok(web::Json(PreferencesResponse::from(preferences)))
}

/// Replace the caller's `showPublic` flag.
#[utoipa::path(
    put,
    path = "/api/v1/preferences",
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Updated preferences", body = PreferencesResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["preferences"],
    operation_id = "updatePreferences"
)]
#[put("/preferences")]
pub async fn update_preferences(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<PreferencesRequest>,
) -> ApiResult<web::Json<PreferencesResponse>> {
    let show_public = payload
        .show_public
        .ok_or_else(|| missing_field_error(SHOW_PUBLIC))?;
    let preferences = state
        .preferences
        .update(UpdatePreferencesRequest {
            uid: auth.uid().clone(),
            show_public,
        })
        .await?;
    Ok(web::Json(PreferencesResponse::from(preferences)))
}
