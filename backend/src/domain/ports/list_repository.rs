//! Port for shared list persistence.

use async_trait::async_trait;

use crate::domain::{ListId, SharedList, Uid};

use super::define_port_error;

define_port_error! {
    /// Errors raised by list repository adapters.
    pub enum ListRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "list repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "list repository query failed: {message}",
    }
}

/// Storage contract for [`SharedList`] documents.
///
/// Collaborator changes go through [`ListRepository::add_collaborator`] and
/// [`ListRepository::remove_collaborator`], which adapters must apply
/// atomically. [`ListRepository::update_metadata`] never touches
/// collaborators, so metadata edits cannot drop concurrent invitations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn find_by_id(&self, id: &ListId) -> Result<Option<SharedList>, ListRepositoryError>;

    async fn insert(&self, list: &SharedList) -> Result<(), ListRepositoryError>;

    /// Persist title, category, visibility, and `updated_at` from `list`.
    ///
    /// Returns the stored list, or `None` when the id is unknown.
    async fn update_metadata(
        &self,
        list: &SharedList,
    ) -> Result<Option<SharedList>, ListRepositoryError>;

    /// Delete a list; returns whether a row was removed.
    async fn delete(&self, id: &ListId) -> Result<bool, ListRepositoryError>;

    /// Atomically add `uid` to the collaborator set. No-op when present.
    async fn add_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError>;

    /// Atomically remove `uid` from the collaborator set. No-op when absent.
    async fn remove_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError>;

    /// Lists that are public, owned by `viewer`, or shared with `viewer`,
    /// newest first. Anonymous viewers receive public lists only.
    async fn list_visible_to(
        &self,
        viewer: Option<Uid>,
    ) -> Result<Vec<SharedList>, ListRepositoryError>;
}
