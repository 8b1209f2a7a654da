//! `CategoryRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId, name_key};

use super::{MemoryStore, lock};

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        Ok(categories.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError> {
        let categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        Ok(categories
            .values()
            .find(|category| category.matches_name(name))
            .cloned())
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        if categories
            .values()
            .any(|existing| existing.matches_name(&category.name))
        {
            return Err(CategoryRepositoryError::duplicate_name(category.name.as_str()));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn rename(
        &self,
        id: &CategoryId,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        if categories
            .values()
            .any(|other| other.id != *id && other.matches_name(name))
        {
            return Err(CategoryRepositoryError::duplicate_name(name));
        }
        Ok(categories.get_mut(id).map(|category| {
            category.name = name.to_owned();
            category.clone()
        }))
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        Ok(categories.remove(id).is_some())
    }

    async fn append_tag_if_absent(
        &self,
        id: &CategoryId,
        tag: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        Ok(categories.get_mut(id).map(|category| {
            category.sub_category_tags.append_if_absent(tag);
            category.clone()
        }))
    }

    async fn list_public(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        let mut public: Vec<Category> = categories
            .values()
            .filter(|category| category.is_public)
            .cloned()
            .collect();
        public.sort_by_cached_key(|category| name_key(&category.name));
        Ok(public)
    }

    async fn find_many(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        let categories = lock(&self.categories).map_err(CategoryRepositoryError::query)?;
        Ok(ids
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect())
    }
}
