//! Port for item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemId, ListId, Uid};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
    }
}

/// Storage for items, including atomic per-user completion updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError>;

    /// Items of a list in creation order.
    async fn list_by_list(&self, list_id: &ListId) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Persist `text` and `sub_category` from `item`.
    ///
    /// Returns the stored item, or `None` when the id is unknown.
    async fn update_fields(&self, item: &Item) -> Result<Option<Item>, ItemRepositoryError>;

    /// Atomically add or remove exactly `uid` in the item's `done_by` set.
    ///
    /// Returns the stored item, or `None` when the id is unknown.
    async fn set_done(
        &self,
        id: &ItemId,
        uid: &Uid,
        done: bool,
    ) -> Result<Option<Item>, ItemRepositoryError>;

    /// Delete an item; returns whether a row was removed.
    async fn delete(&self, id: &ItemId) -> Result<bool, ItemRepositoryError>;

    /// Delete every item of a list, returning how many were removed.
    async fn delete_by_list(&self, list_id: &ListId) -> Result<u64, ItemRepositoryError>;

    /// Count items of a list added by anyone other than `owner`.
    async fn count_foreign(
        &self,
        list_id: &ListId,
        owner: &Uid,
    ) -> Result<u64, ItemRepositoryError>;
}
