//! `ListRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{ListRepository, ListRepositoryError};
use crate::domain::{ListId, SharedList, Uid, is_visible_to};

use super::{MemoryStore, lock};

#[async_trait]
impl ListRepository for MemoryStore {
    async fn find_by_id(&self, id: &ListId) -> Result<Option<SharedList>, ListRepositoryError> {
        let lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        Ok(lists.get(id).cloned())
    }

    async fn insert(&self, list: &SharedList) -> Result<(), ListRepositoryError> {
        let mut lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        lists.insert(list.id, list.clone());
        Ok(())
    }

    async fn update_metadata(
        &self,
        list: &SharedList,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        Ok(lists.get_mut(&list.id).map(|stored| {
            // Collaborators are owned by the set primitives; keep the stored ones.
            stored.title.clone_from(&list.title);
            stored.category_id = list.category_id;
            stored.is_public = list.is_public;
            stored.updated_at = list.updated_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: &ListId) -> Result<bool, ListRepositoryError> {
        let mut lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        Ok(lists.remove(id).is_some())
    }

    async fn add_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        Ok(lists.get_mut(id).map(|list| {
            list.collaborators.insert(uid.clone());
            list.clone()
        }))
    }

    async fn remove_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        Ok(lists.get_mut(id).map(|list| {
            list.collaborators.remove(uid);
            list.clone()
        }))
    }

    async fn list_visible_to(
        &self,
        viewer: Option<Uid>,
    ) -> Result<Vec<SharedList>, ListRepositoryError> {
        let lists = lock(&self.lists).map_err(ListRepositoryError::query)?;
        let mut visible: Vec<SharedList> = lists
            .values()
            .filter(|list| is_visible_to(list, viewer.as_ref()))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }
}
