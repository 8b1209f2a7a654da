//! OpenAPI schema definitions and response bodies.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! error wrappers here register external schemas for the domain error; the
//! response structs are the JSON bodies handlers actually return.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Category, ItemView, ListView, SharedList, UserPreferences, UserProfile};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The identity provider or store is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// A category as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub owner_uid: String,
    pub is_public: bool,
    pub sub_category_tags: Vec<String>,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            owner_uid: value.owner_uid.into(),
            is_public: value.is_public,
            sub_category_tags: value.sub_category_tags.into(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// A shared list as returned by mutation endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub owner_uid: String,
    pub is_public: bool,
    pub collaborators: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SharedList> for ListResponse {
    fn from(value: SharedList) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            category_id: value.category_id.to_string(),
            owner_uid: value.owner_uid.into(),
            is_public: value.is_public,
            collaborators: value.collaborators.iter().map(ToString::to_string).collect(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Display details for a uid; fields are absent when enrichment degraded.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(value: UserProfile) -> Self {
        Self {
            uid: value.uid.into(),
            email: value.email,
            display_name: value.display_name,
        }
    }
}

/// A visible list with owner, collaborator, and category details.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListViewResponse {
    #[serde(flatten)]
    pub list: ListResponse,
    pub category_name: Option<String>,
    pub owner: ProfileResponse,
    pub collaborator_profiles: Vec<ProfileResponse>,
}

impl From<ListView> for ListViewResponse {
    fn from(value: ListView) -> Self {
        Self {
            list: ListResponse::from(value.list),
            category_name: value.category_name,
            owner: ProfileResponse::from(value.owner),
            collaborator_profiles: value
                .collaborators
                .into_iter()
                .map(ProfileResponse::from)
                .collect(),
        }
    }
}

/// An item with the caller's completion state.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub list_id: String,
    pub text: String,
    pub sub_category: String,
    pub added_by: String,
    /// Every uid that has marked the item done.
    pub done_by: Vec<String>,
    pub done: bool,
    pub created_at: String,
}

impl From<ItemView> for ItemResponse {
    fn from(value: ItemView) -> Self {
        let ItemView { item, done } = value;
        Self {
            id: item.id.to_string(),
            list_id: item.list_id.to_string(),
            text: item.text,
            sub_category: item.sub_category,
            added_by: item.added_by.into(),
            done_by: item.done_by.iter().map(ToString::to_string).collect(),
            done,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// Stored display preferences for the caller.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub uid: String,
    pub show_public: bool,
    pub updated_at: String,
}

impl From<UserPreferences> for PreferencesResponse {
    fn from(value: UserPreferences) -> Self {
        Self {
            uid: value.uid.into(),
            show_public: value.show_public,
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryId, Item, Uid};
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_has_expected_name() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
    }

    #[test]
    fn list_views_flatten_the_list_fields() {
        let owner = Uid::new("alice").expect("uid");
        let list = SharedList::new(
            "Films".to_owned(),
            CategoryId::random(),
            owner.clone(),
            true,
        );
        let view = ListView {
            list,
            category_name: Some("Movies".to_owned()),
            owner: UserProfile::bare(owner),
            collaborators: Vec::new(),
        };

        let json = serde_json::to_value(ListViewResponse::from(view)).expect("serialises");
        assert_eq!(json["title"], "Films");
        assert_eq!(json["categoryName"], "Movies");
        assert_eq!(json["owner"]["uid"], "alice");
        assert!(json["owner"].get("email").is_none());
    }

    #[test]
    fn item_responses_carry_the_viewer_projection() {
        let alice = Uid::new("alice").expect("uid");
        let mut item = Item::new(
            crate::domain::ListId::random(),
            "Milk".to_owned(),
            "Dairy".to_owned(),
            alice.clone(),
        );
        item.done_by.insert(alice.clone());

        let response = ItemResponse::from(item.view_for(Some(&alice)));
        assert!(response.done);
        assert_eq!(response.done_by, vec!["alice".to_owned()]);
        assert_eq!(response.sub_category, "Dairy");
    }
}
