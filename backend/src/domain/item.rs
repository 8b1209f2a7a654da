//! Items held by a shared list and their per-viewer projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, ListId, Uid, UidSet};

/// Sub-category assigned when none is supplied.
pub const DEFAULT_SUB_CATEGORY: &str = "Misc";

/// An entry in a list.
///
/// Completion is tracked per user: `done_by` holds every uid that marked the
/// item done and is the only completion state stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier.
    pub id: ItemId,
    /// Soft reference to the parent list.
    pub list_id: ListId,
    /// Trimmed, non-empty text.
    pub text: String,
    /// Free-form tag; `"Misc"` by default.
    pub sub_category: String,
    /// Uid that created the item.
    pub added_by: Uid,
    /// Uids that marked the item done.
    pub done_by: UidSet,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item with nobody marked done.
    pub fn new(list_id: ListId, text: String, sub_category: String, added_by: Uid) -> Self {
        Self {
            id: ItemId::random(),
            list_id,
            text,
            sub_category,
            added_by,
            done_by: UidSet::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether `viewer` marked this item done; anonymous viewers never have.
    ///
    /// # Examples
    /// ```
    /// use listshare::domain::{Item, ListId, Uid};
    ///
    /// let alice = Uid::new("alice").expect("uid");
    /// let mut item = Item::new(ListId::random(), "Dune".into(), "Misc".into(), alice.clone());
    /// item.done_by.insert(alice.clone());
    ///
    /// assert!(item.is_done_for(Some(&alice)));
    /// assert!(!item.is_done_for(None));
    /// ```
    pub fn is_done_for(&self, viewer: Option<&Uid>) -> bool {
        viewer.is_some_and(|uid| self.done_by.contains(uid))
    }

    /// Project the item for `viewer`.
    pub fn view_for(self, viewer: Option<&Uid>) -> ItemView {
        let done = self.is_done_for(viewer);
        ItemView { item: self, done }
    }
}

/// An item together with the requesting viewer's completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    /// The stored item.
    pub item: Item,
    /// Whether the viewer has marked the item done.
    pub done: bool,
}

/// Input for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Raw text; trimmed before use.
    pub text: String,
    /// Optional sub-category tag.
    pub sub_category: Option<String>,
}

/// Creator-only editable fields; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New text.
    pub text: Option<String>,
    /// New sub-category; blank resets to the default.
    pub sub_category: Option<String>,
}

/// Normalise an optional sub-category, falling back to [`DEFAULT_SUB_CATEGORY`].
///
/// Returns the tag to store and whether a caller-supplied tag was used.
pub fn normalise_sub_category(raw: Option<&str>) -> (String, bool) {
    match raw.map(str::trim).filter(|tag| !tag.is_empty()) {
        Some(tag) => (tag.to_owned(), true),
        None => (DEFAULT_SUB_CATEGORY.to_owned(), false),
    }
}
