//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types validate stored uids and fail with a message when a row is corrupt.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Category, CategoryId, Item, ItemId, ListId, SharedList, Uid, UidSet, UserPreferences,
};

use super::schema::{categories, items, shared_lists, user_preferences};

fn stored_uid(raw: String, column: &str) -> Result<Uid, String> {
    Uid::new(raw).map_err(|err| format!("invalid uid in {column}: {err}"))
}

fn stored_uid_set(raw: Vec<String>, column: &str) -> Result<UidSet, String> {
    raw.into_iter()
        .map(|value| stored_uid(value, column))
        .collect::<Result<Vec<_>, _>>()
        .map(UidSet::from)
}

fn uid_strings(set: &UidSet) -> Vec<String> {
    set.iter().map(|uid| uid.as_ref().to_owned()).collect()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub owner_uid: String,
    pub is_public: bool,
    pub sub_category_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = String;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            owner_uid: stored_uid(row.owner_uid, "categories.owner_uid")?,
            is_public: row.is_public,
            sub_category_tags: row.sub_category_tags.into(),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub owner_uid: &'a str,
    pub is_public: bool,
    pub sub_category_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Category> for NewCategoryRow<'a> {
    fn from(category: &'a Category) -> Self {
        Self {
            id: *category.id.as_uuid(),
            name: &category.name,
            owner_uid: category.owner_uid.as_ref(),
            is_public: category.is_public,
            sub_category_tags: category.sub_category_tags.as_slice().to_vec(),
            created_at: category.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shared_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListRow {
    pub id: Uuid,
    pub title: String,
    pub category_id: Uuid,
    pub owner_uid: String,
    pub is_public: bool,
    pub collaborators: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ListRow> for SharedList {
    type Error = String;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ListId::from_uuid(row.id),
            title: row.title,
            category_id: CategoryId::from_uuid(row.category_id),
            owner_uid: stored_uid(row.owner_uid, "shared_lists.owner_uid")?,
            is_public: row.is_public,
            collaborators: stored_uid_set(row.collaborators, "shared_lists.collaborators")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shared_lists)]
pub(crate) struct NewListRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub category_id: Uuid,
    pub owner_uid: &'a str,
    pub is_public: bool,
    pub collaborators: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a SharedList> for NewListRow<'a> {
    fn from(list: &'a SharedList) -> Self {
        Self {
            id: *list.id.as_uuid(),
            title: &list.title,
            category_id: *list.category_id.as_uuid(),
            owner_uid: list.owner_uid.as_ref(),
            is_public: list.is_public,
            collaborators: uid_strings(&list.collaborators),
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

/// Metadata changeset; collaborators are deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = shared_lists)]
pub(crate) struct ListMetadataUpdate<'a> {
    pub title: &'a str,
    pub category_id: Uuid,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub list_id: Uuid,
    pub text: String,
    pub sub_category: String,
    pub added_by: String,
    pub done_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = String;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ItemId::from_uuid(row.id),
            list_id: ListId::from_uuid(row.list_id),
            text: row.text,
            sub_category: row.sub_category,
            added_by: stored_uid(row.added_by, "items.added_by")?,
            done_by: stored_uid_set(row.done_by, "items.done_by")?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub id: Uuid,
    pub list_id: Uuid,
    pub text: &'a str,
    pub sub_category: &'a str,
    pub added_by: &'a str,
    pub done_by: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Item> for NewItemRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: *item.id.as_uuid(),
            list_id: *item.list_id.as_uuid(),
            text: &item.text,
            sub_category: &item.sub_category,
            added_by: item.added_by.as_ref(),
            done_by: uid_strings(&item.done_by),
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = items)]
pub(crate) struct ItemFieldsUpdate<'a> {
    pub text: &'a str,
    pub sub_category: &'a str,
}

// ---------------------------------------------------------------------------
// User preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserPreferencesRow {
    pub uid: String,
    pub show_public: bool,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserPreferencesRow> for UserPreferences {
    type Error = String;

    fn try_from(row: UserPreferencesRow) -> Result<Self, Self::Error> {
        Ok(Self {
            uid: stored_uid(row.uid, "user_preferences.uid")?,
            show_public: row.show_public,
            updated_at: row.updated_at,
        })
    }
}

impl From<&UserPreferences> for UserPreferencesRow {
    fn from(preferences: &UserPreferences) -> Self {
        Self {
            uid: preferences.uid.as_ref().to_owned(),
            show_public: preferences.show_public,
            updated_at: preferences.updated_at,
        }
    }
}
