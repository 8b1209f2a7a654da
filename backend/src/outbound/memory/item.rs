//! `ItemRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, ListId, Uid};

use super::{MemoryStore, lock};

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        Ok(items.get(id).cloned())
    }

    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        let mut items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn list_by_list(&self, list_id: &ListId) -> Result<Vec<Item>, ItemRepositoryError> {
        let items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        let mut found: Vec<Item> = items
            .values()
            .filter(|item| item.list_id == *list_id)
            .cloned()
            .collect();
        found.sort_by_key(|item| item.created_at);
        Ok(found)
    }

    async fn update_fields(&self, item: &Item) -> Result<Option<Item>, ItemRepositoryError> {
        let mut items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        Ok(items.get_mut(&item.id).map(|stored| {
            stored.text.clone_from(&item.text);
            stored.sub_category.clone_from(&item.sub_category);
            stored.clone()
        }))
    }

    async fn set_done(
        &self,
        id: &ItemId,
        uid: &Uid,
        done: bool,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let mut items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        Ok(items.get_mut(id).map(|item| {
            if done {
                item.done_by.insert(uid.clone());
            } else {
                item.done_by.remove(uid);
            }
            item.clone()
        }))
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, ItemRepositoryError> {
        let mut items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        Ok(items.remove(id).is_some())
    }

    async fn delete_by_list(&self, list_id: &ListId) -> Result<u64, ItemRepositoryError> {
        let mut items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        let before = items.len();
        items.retain(|_, item| item.list_id != *list_id);
        Ok((before - items.len()) as u64)
    }

    async fn count_foreign(
        &self,
        list_id: &ListId,
        owner: &Uid,
    ) -> Result<u64, ItemRepositoryError> {
        let items = lock(&self.items).map_err(ItemRepositoryError::query)?;
        let count = items
            .values()
            .filter(|item| item.list_id == *list_id && item.added_by != *owner)
            .count();
        Ok(count as u64)
    }
}
