//! Categories grouping shared lists.
//!
//! A category name is unique ignoring case. Each category accumulates the
//! sub-category tags its items have used; tags are only ever appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Uid};

/// Name used when a list is created without a category.
pub const FALLBACK_CATEGORY_NAME: &str = "Other";

/// Category names seeded at startup when no override is configured.
pub const DEFAULT_SEED_CATEGORIES: [&str; 9] = [
    "To Do", "Movies", "Novels", "Animes", "Series", "Hotels", "Trips", "Treks", "Eateries",
];

/// Fold a category name or tag into its case-insensitive comparison key.
///
/// # Examples
/// ```
/// use listshare::domain::name_key;
///
/// assert_eq!(name_key("Movies"), name_key("mOVIES"));
/// ```
pub fn name_key(value: &str) -> String {
    value.to_lowercase()
}

/// Ordered set of sub-category tags with case-insensitive membership.
///
/// Insertion order is preserved and the first spelling of a tag wins.
///
/// # Examples
/// ```
/// use listshare::domain::SubCategoryTags;
///
/// let mut tags = SubCategoryTags::default();
/// assert!(tags.append_if_absent("Snacks"));
/// assert!(!tags.append_if_absent("snacks"));
/// assert_eq!(tags.as_slice(), ["Snacks".to_owned()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SubCategoryTags(Vec<String>);

impl SubCategoryTags {
    /// Whether a tag matching `tag` ignoring case is present.
    pub fn contains(&self, tag: &str) -> bool {
        let key = name_key(tag);
        self.0.iter().any(|existing| name_key(existing) == key)
    }

    /// Append `tag` unless a case-insensitive match exists.
    ///
    /// Returns `true` when the tag was appended.
    pub fn append_if_absent(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_owned());
        true
    }

    /// Borrow the tags in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tags have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for SubCategoryTags {
    fn from(values: Vec<String>) -> Self {
        let mut tags = Self::default();
        for value in values {
            tags.append_if_absent(&value);
        }
        tags
    }
}

impl From<SubCategoryTags> for Vec<String> {
    fn from(value: SubCategoryTags) -> Self {
        value.0
    }
}

/// A named category owning a set of sub-category tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier.
    pub id: CategoryId,
    /// Display name; unique ignoring case.
    pub name: String,
    /// Creator, or the admin for seeded categories.
    pub owner_uid: Uid,
    /// Whether the category is listed publicly.
    pub is_public: bool,
    /// Tags used by items of lists in this category.
    pub sub_category_tags: SubCategoryTags,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Build a new public category with no tags.
    pub fn new_public(name: impl Into<String>, owner_uid: Uid) -> Self {
        Self {
            id: CategoryId::random(),
            name: name.into(),
            owner_uid,
            is_public: true,
            sub_category_tags: SubCategoryTags::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether `name` matches this category ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn tags_deduplicate_on_construction() {
        let tags = SubCategoryTags::from(vec![
            "Snacks".to_owned(),
            "SNACKS".to_owned(),
            "Drinks".to_owned(),
        ]);
        assert_eq!(tags.as_slice(), ["Snacks".to_owned(), "Drinks".to_owned()]);
    }

    #[rstest]
    #[case("movies")]
    #[case("MOVIES")]
    #[case("Movies")]
    fn names_match_ignoring_case(#[case] probe: &str) {
        let owner = Uid::new("owner").expect("uid");
        let category = Category::new_public("Movies", owner);
        assert!(category.matches_name(probe));
    }
}
