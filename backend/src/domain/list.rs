//! Shared lists and the inputs used to create or change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, ListId, Uid, UidSet};

/// A categorised list owned by one uid and shared with collaborators.
///
/// ## Invariants
/// - `owner_uid` never changes after creation.
/// - `collaborators` never contains `owner_uid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedList {
    /// Stable identifier.
    pub id: ListId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Soft reference to the list's category; may dangle.
    pub category_id: CategoryId,
    /// Creator of the list.
    pub owner_uid: Uid,
    /// Whether anonymous and unrelated viewers may see the list.
    pub is_public: bool,
    /// Uids granted edit rights by the owner.
    pub collaborators: UidSet,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last metadata change.
    pub updated_at: DateTime<Utc>,
}

impl SharedList {
    /// Build a list with no collaborators.
    pub fn new(title: String, category_id: CategoryId, owner_uid: Uid, is_public: bool) -> Self {
        let now = Utc::now();
        Self {
            id: ListId::random(),
            title,
            category_id,
            owner_uid,
            is_public,
            collaborators: UidSet::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch to the mutable fields.
    pub fn apply(&mut self, patch: &ListPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_owned();
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
    }
}

/// How a new list names its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    /// An existing category id.
    Id(CategoryId),
    /// A free-text name, resolved or created ignoring case.
    Name(String),
}

/// Input for creating a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    /// Raw title; trimmed before use.
    pub title: String,
    /// Category reference.
    pub category: CategoryRef,
    /// Visibility flag.
    pub is_public: bool,
}

/// Mutable list fields; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category_id: Option<CategoryId>,
    /// New visibility.
    pub is_public: Option<bool>,
}

/// How a collaborator is identified when invited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorRef {
    /// A known uid.
    Uid(Uid),
    /// An email resolved through the identity provider.
    Email(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_trims_title_and_keeps_owner() {
        let owner = Uid::new("owner").expect("uid");
        let mut list = SharedList::new("Films".to_owned(), CategoryId::random(), owner.clone(), false);
        list.apply(&ListPatch {
            title: Some("  Films 2025 ".to_owned()),
            category_id: None,
            is_public: Some(true),
        });

        assert_eq!(list.title, "Films 2025");
        assert!(list.is_public);
        assert_eq!(list.owner_uid, owner);
    }
}
