//! Driving port for category management.
//!
//! Inbound adapters and the list and item services use this port to resolve,
//! rename, remove, and tag categories without touching storage directly.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Error, Uid};

/// Domain use-case port for the category directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    /// Return the category whose name matches `name` ignoring case, creating
    /// a public category owned by `actor` when none exists.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when the trimmed name is empty.
    /// - `Conflict` when a concurrent insert won but cannot be read back.
    async fn resolve_or_create(&self, name: &str, actor: &Uid) -> Result<Category, Error>;

    /// Rename a category. Owner or admin only.
    async fn rename(&self, id: &CategoryId, new_name: &str, actor: &Uid)
    -> Result<Category, Error>;

    /// Delete a category. Admin only; lists keep their dangling reference.
    async fn remove(&self, id: &CategoryId, actor: &Uid) -> Result<(), Error>;

    /// Record a sub-category tag. Blank tags are ignored; repeated or
    /// case-variant tags leave the set unchanged.
    async fn add_sub_category_tag(&self, id: &CategoryId, tag: &str) -> Result<(), Error>;

    /// Public categories ordered by name.
    async fn list_public(&self) -> Result<Vec<Category>, Error>;

    async fn find(&self, id: &CategoryId) -> Result<Option<Category>, Error>;

    /// Ensure the bootstrap categories exist, returning how many were created.
    async fn seed_defaults(&self) -> Result<usize, Error>;
}
