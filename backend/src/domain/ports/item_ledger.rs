//! Driving port for list items and per-user completion.

use async_trait::async_trait;

use crate::domain::{Error, ItemId, ItemPatch, ItemView, ListId, NewItem, Uid};

/// Domain use-case port for the item ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemLedger: Send + Sync {
    /// Items of a list projected for `viewer`. Never mutates.
    async fn list_for_viewer(
        &self,
        list_id: &ListId,
        viewer: Option<Uid>,
    ) -> Result<Vec<ItemView>, Error>;

    async fn create(&self, list_id: &ListId, new_item: NewItem, actor: &Uid)
    -> Result<ItemView, Error>;

    /// Mark or unmark the item done for `actor` only.
    async fn toggle_done(&self, item_id: &ItemId, actor: &Uid, done: bool)
    -> Result<ItemView, Error>;

    /// Edit text or sub-category. Item creator only.
    async fn update_fields(
        &self,
        item_id: &ItemId,
        actor: &Uid,
        patch: ItemPatch,
    ) -> Result<ItemView, Error>;

    /// Remove an item. Items whose parent list is gone remain deletable by
    /// their creator or the admin.
    async fn delete(&self, item_id: &ItemId, actor: &Uid) -> Result<(), Error>;
}
