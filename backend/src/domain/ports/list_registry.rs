//! Driving port for shared list lifecycle and collaborator management.

use async_trait::async_trait;

use crate::domain::{CollaboratorRef, Error, ListId, ListPatch, NewList, SharedList, Uid};

/// Domain use-case port for the list registry.
///
/// [`ListRegistry::can_edit`] is the single write gate consulted by the item
/// ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRegistry: Send + Sync {
    /// Create a list owned by `owner`.
    async fn create(&self, new_list: NewList, owner: &Uid) -> Result<SharedList, Error>;

    /// Change title, category, or visibility. Owner only.
    async fn update(&self, id: &ListId, patch: ListPatch, actor: &Uid)
    -> Result<SharedList, Error>;

    /// Delete a list and its items.
    ///
    /// Allowed for the owner when no one else has added items, or for the
    /// admin when the list is public.
    async fn delete(&self, id: &ListId, actor: &Uid) -> Result<(), Error>;

    /// Grant edit rights to a uid or an email resolved through the identity
    /// provider. Owner only; idempotent.
    async fn add_collaborator(
        &self,
        id: &ListId,
        actor: &Uid,
        collaborator: CollaboratorRef,
    ) -> Result<SharedList, Error>;

    /// Revoke edit rights. Owner only; idempotent.
    async fn remove_collaborator(
        &self,
        id: &ListId,
        actor: &Uid,
        target: &Uid,
    ) -> Result<SharedList, Error>;

    /// Whether `uid` may add, toggle, or delete items on the list.
    async fn can_edit(&self, uid: &Uid, id: &ListId) -> Result<bool, Error>;

    async fn find(&self, id: &ListId) -> Result<SharedList, Error>;
}
