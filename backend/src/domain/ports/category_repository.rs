//! Port for category persistence.
//!
//! Names are unique ignoring case; adapters enforce this and report
//! collisions as [`CategoryRepositoryError::DuplicateName`]. Tag appends must
//! be atomic so concurrent writers never lose each other's tags.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "category repository query failed: {message}",
        /// Another category already uses this name, ignoring case.
        DuplicateName { name: String } =>
            "category name already exists: {name}",
    }
}

/// Storage for categories keyed by id and case-insensitive name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// Look up a category by name ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Insert a new category.
    ///
    /// Fails with [`CategoryRepositoryError::DuplicateName`] when the name is
    /// already taken ignoring case.
    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError>;

    /// Change a category's name, returning the updated row or `None` when the
    /// id is unknown.
    async fn rename(
        &self,
        id: &CategoryId,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Delete a category; returns whether a row was removed.
    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryRepositoryError>;

    /// Atomically append `tag` unless a case-insensitive match is present.
    ///
    /// Returns the category after the operation, or `None` when the id is
    /// unknown.
    async fn append_tag_if_absent(
        &self,
        id: &CategoryId,
        tag: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// All public categories ordered by name.
    async fn list_public(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch several categories at once; unknown ids are skipped.
    async fn find_many(&self, ids: &[CategoryId])
    -> Result<Vec<Category>, CategoryRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_mentions_the_name() {
        let err = CategoryRepositoryError::duplicate_name("Movies");
        assert_eq!(err.to_string(), "category name already exists: Movies");
    }
}
