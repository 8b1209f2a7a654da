//! Category directory service.
//!
//! Implements [`CategoryDirectory`] over a [`CategoryRepository`]. Name
//! uniqueness ignoring case is enforced by the store; this service resolves
//! races by re-reading after a duplicate insert.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::repository_errors::map_category_error;
use crate::domain::ports::{CategoryDirectory, CategoryRepository, CategoryRepositoryError};
use crate::domain::{AccessPolicy, Category, CategoryId, DEFAULT_SEED_CATEGORIES, Error, Uid};

/// Category directory backed by a repository.
#[derive(Clone)]
pub struct CategoryDirectoryService<C> {
    repo: Arc<C>,
    policy: Arc<AccessPolicy>,
    seed_names: Arc<Vec<String>>,
}

impl<C> CategoryDirectoryService<C> {
    /// Create a service seeding [`DEFAULT_SEED_CATEGORIES`].
    pub fn new(repo: Arc<C>, policy: Arc<AccessPolicy>) -> Self {
        let seed_names = DEFAULT_SEED_CATEGORIES
            .iter()
            .map(|name| (*name).to_owned())
            .collect();
        Self::with_seed_names(repo, policy, seed_names)
    }

    /// Create a service with a custom bootstrap list.
    pub fn with_seed_names(repo: Arc<C>, policy: Arc<AccessPolicy>, seed_names: Vec<String>) -> Self {
        Self {
            repo,
            policy,
            seed_names: Arc::new(seed_names),
        }
    }
}

fn trimmed_name(raw: &str) -> Result<&str, Error> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::invalid_request("category name must not be empty"));
    }
    Ok(name)
}

impl<C> CategoryDirectoryService<C>
where
    C: CategoryRepository,
{
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, Error> {
        self.repo
            .find_by_name(name)
            .await
            .map_err(map_category_error)
    }

    async fn require(&self, id: &CategoryId) -> Result<Category, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))
    }

    /// Insert `name` unless it exists; `None` when it already did.
    async fn insert_if_absent(&self, name: &str, owner: &Uid) -> Result<Option<Category>, Error> {
        let category = Category::new_public(name, owner.clone());
        match self.repo.insert(&category).await {
            Ok(()) => Ok(Some(category)),
            Err(CategoryRepositoryError::DuplicateName { .. }) => Ok(None),
            Err(err) => Err(map_category_error(err)),
        }
    }
}

#[async_trait]
impl<C> CategoryDirectory for CategoryDirectoryService<C>
where
    C: CategoryRepository,
{
    async fn resolve_or_create(&self, name: &str, actor: &Uid) -> Result<Category, Error> {
        let name = trimmed_name(name)?;
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(existing);
        }

        if let Some(created) = self.insert_if_absent(name, actor).await? {
            info!(category_id = %created.id, name, owner = %actor, "category created");
            return Ok(created);
        }

        debug!(name, "category inserted concurrently; re-reading");
        self.find_by_name(name)
            .await?
            .ok_or_else(|| Error::conflict(format!("category {name} could not be resolved")))
    }

    async fn rename(
        &self,
        id: &CategoryId,
        new_name: &str,
        actor: &Uid,
    ) -> Result<Category, Error> {
        let new_name = trimmed_name(new_name)?;
        let category = self.require(id).await?;
        if !self.policy.may_rename_category(actor, &category) {
            return Err(Error::forbidden(
                "only the category owner or the admin may rename it",
            ));
        }
        let collision = self.find_by_name(new_name).await?;
        if collision.is_some_and(|other| other.id != category.id) {
            return Err(Error::conflict(format!(
                "a category named {new_name} already exists"
            )));
        }

        self.repo
            .rename(id, new_name)
            .await
            .map_err(map_category_error)?
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))
    }

    async fn remove(&self, id: &CategoryId, actor: &Uid) -> Result<(), Error> {
        if !self.policy.may_remove_category(actor) {
            return Err(Error::forbidden("only the admin may remove categories"));
        }
        let removed = self.repo.delete(id).await.map_err(map_category_error)?;
        if !removed {
            return Err(Error::not_found(format!("category {id} not found")));
        }
        info!(category_id = %id, "category removed");
        Ok(())
    }

    async fn add_sub_category_tag(&self, id: &CategoryId, tag: &str) -> Result<(), Error> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(());
        }
        self.repo
            .append_tag_if_absent(id, tag)
            .await
            .map_err(map_category_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))
    }

    async fn list_public(&self) -> Result<Vec<Category>, Error> {
        self.repo.list_public().await.map_err(map_category_error)
    }

    async fn find(&self, id: &CategoryId) -> Result<Option<Category>, Error> {
        self.repo.find_by_id(id).await.map_err(map_category_error)
    }

    async fn seed_defaults(&self) -> Result<usize, Error> {
        let admin = self.policy.admin_uid();
        let mut created = 0;
        for raw in self.seed_names.iter() {
            let Ok(name) = trimmed_name(raw) else {
                continue;
            };
            if self.find_by_name(name).await?.is_some() {
                continue;
            }
            if self.insert_if_absent(name, admin).await?.is_some() {
                created += 1;
            }
        }
        info!(created, "default categories seeded");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
