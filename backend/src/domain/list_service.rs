//! List registry service.
//!
//! Owns the shared list lifecycle: creation with category resolution,
//! owner-only edits, the foreign-items delete rule with item cascade, and
//! collaborator management.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::repository_errors::{map_identity_error, map_item_error, map_list_error};
use crate::domain::ports::{CategoryDirectory, IdentityGateway, ItemRepository, ListRegistry, ListRepository};
use crate::domain::{
    AccessPolicy, Category, CategoryRef, CollaboratorRef, Error, FALLBACK_CATEGORY_NAME, ListId,
    ListPatch, NewList, SharedList, Uid,
};

/// List registry backed by list and item repositories.
#[derive(Clone)]
pub struct ListRegistryService<L, I> {
    lists: Arc<L>,
    items: Arc<I>,
    categories: Arc<dyn CategoryDirectory>,
    identity: Arc<dyn IdentityGateway>,
    policy: Arc<AccessPolicy>,
}

impl<L, I> ListRegistryService<L, I> {
    /// Build the registry over its stores, the category directory and the
    /// identity gateway.
    pub fn new(
        lists: Arc<L>,
        items: Arc<I>,
        categories: Arc<dyn CategoryDirectory>,
        identity: Arc<dyn IdentityGateway>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            lists,
            items,
            categories,
            identity,
            policy,
        }
    }
}

fn trimmed_title(raw: &str) -> Result<String, Error> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::invalid_request("list title must not be empty"));
    }
    Ok(title.to_owned())
}

fn list_not_found(id: &ListId) -> Error {
    Error::not_found(format!("list {id} not found"))
}

impl<L, I> ListRegistryService<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    async fn require(&self, id: &ListId) -> Result<SharedList, Error> {
        self.lists
            .find_by_id(id)
            .await
            .map_err(map_list_error)?
            .ok_or_else(|| list_not_found(id))
    }

    async fn require_owner(&self, id: &ListId, actor: &Uid) -> Result<SharedList, Error> {
        let list = self.require(id).await?;
        if !self.policy.may_manage_collaborators(actor, &list) {
            return Err(Error::forbidden("only the list owner may manage collaborators"));
        }
        Ok(list)
    }

    async fn resolve_category(&self, category: CategoryRef, owner: &Uid) -> Result<Category, Error> {
        match category {
            CategoryRef::Id(id) => self
                .categories
                .find(&id)
                .await?
                .ok_or_else(|| Error::not_found(format!("category {id} not found"))),
            CategoryRef::Name(name) => {
                let name = match name.trim() {
                    "" => FALLBACK_CATEGORY_NAME,
                    trimmed => trimmed,
                };
                self.categories.resolve_or_create(name, owner).await
            }
        }
    }

    async fn resolve_collaborator(&self, collaborator: CollaboratorRef) -> Result<Uid, Error> {
        match collaborator {
            CollaboratorRef::Uid(uid) => Ok(uid),
            CollaboratorRef::Email(email) => {
                let email = email.trim();
                if email.is_empty() {
                    return Err(Error::invalid_request("collaborator email must not be empty"));
                }
                self.identity
                    .get_user_by_email(email)
                    .await
                    .map_err(map_identity_error)
            }
        }
    }
}

#[async_trait]
impl<L, I> ListRegistry for ListRegistryService<L, I>
where
    L: ListRepository,
    I: ItemRepository,
{
    async fn create(&self, new_list: NewList, owner: &Uid) -> Result<SharedList, Error> {
        let title = trimmed_title(&new_list.title)?;
        let category = self.resolve_category(new_list.category, owner).await?;
        let list = SharedList::new(title, category.id, owner.clone(), new_list.is_public);
        self.lists.insert(&list).await.map_err(map_list_error)?;
        info!(list_id = %list.id, owner = %owner, category_id = %category.id, "list created");
        Ok(list)
    }

    async fn update(
        &self,
        id: &ListId,
        patch: ListPatch,
        actor: &Uid,
    ) -> Result<SharedList, Error> {
        let mut list = self.require(id).await?;
        if !self.policy.may_update_list(actor, &list) {
            return Err(Error::forbidden("only the list owner may edit it"));
        }
        if let Some(title) = &patch.title {
            trimmed_title(title)?;
        }
        if let Some(category_id) = &patch.category_id {
            if self.categories.find(category_id).await?.is_none() {
                return Err(Error::not_found(format!("category {category_id} not found")));
            }
        }

        list.apply(&patch);
        self.lists
            .update_metadata(&list)
            .await
            .map_err(map_list_error)?
            .ok_or_else(|| list_not_found(id))
    }

    async fn delete(&self, id: &ListId, actor: &Uid) -> Result<(), Error> {
        let list = self.require(id).await?;
        let foreign_items = if self.policy.is_owner(actor, &list) {
            self.items
                .count_foreign(id, &list.owner_uid)
                .await
                .map_err(map_item_error)?
        } else {
            0
        };
        if !self.policy.may_delete_list(actor, &list, foreign_items) {
            return Err(Error::forbidden(
                "list can only be deleted by its owner when no one else has added items",
            ));
        }

        let removed_items = self.items.delete_by_list(id).await.map_err(|err| {
            warn!(list_id = %id, error = %err, "item cascade failed; list kept");
            map_item_error(err)
        })?;
        self.lists.delete(id).await.map_err(map_list_error)?;
        info!(list_id = %id, actor = %actor, removed_items, "list deleted");
        Ok(())
    }

    async fn add_collaborator(
        &self,
        id: &ListId,
        actor: &Uid,
        collaborator: CollaboratorRef,
    ) -> Result<SharedList, Error> {
        let list = self.require_owner(id, actor).await?;
        let target = self.resolve_collaborator(collaborator).await?;
        if target == list.owner_uid {
            return Err(Error::invalid_request(
                "the list owner cannot be added as a collaborator",
            ));
        }

        let updated = self
            .lists
            .add_collaborator(id, &target)
            .await
            .map_err(map_list_error)?
            .ok_or_else(|| list_not_found(id))?;
        info!(list_id = %id, collaborator = %target, "collaborator added");
        Ok(updated)
    }

    async fn remove_collaborator(
        &self,
        id: &ListId,
        actor: &Uid,
        target: &Uid,
    ) -> Result<SharedList, Error> {
        self.require_owner(id, actor).await?;
        let updated = self
            .lists
            .remove_collaborator(id, target)
            .await
            .map_err(map_list_error)?
            .ok_or_else(|| list_not_found(id))?;
        info!(list_id = %id, collaborator = %target, "collaborator removed");
        Ok(updated)
    }

    async fn can_edit(&self, uid: &Uid, id: &ListId) -> Result<bool, Error> {
        let list = self.require(id).await?;
        Ok(self.policy.can_edit(uid, &list))
    }

    async fn find(&self, id: &ListId) -> Result<SharedList, Error> {
        self.require(id).await
    }
}

#[cfg(test)]
#[path = "list_service_tests.rs"]
mod tests;
