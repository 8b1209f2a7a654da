//! Item ledger service.
//!
//! Items are gated by [`ListRegistry::can_edit`] on their parent list.
//! Completion is per user: toggling only ever adds or removes the caller in
//! `done_by`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::repository_errors::map_item_error;
use crate::domain::ports::{CategoryDirectory, ItemLedger, ItemRepository, ListRegistry};
use crate::domain::{
    AccessPolicy, Error, ErrorCode, Item, ItemId, ItemPatch, ItemView, ListId, NewItem, Uid,
    is_visible_to, normalise_sub_category,
};

/// Item ledger backed by an item repository.
#[derive(Clone)]
pub struct ItemLedgerService<I> {
    items: Arc<I>,
    lists: Arc<dyn ListRegistry>,
    categories: Arc<dyn CategoryDirectory>,
    policy: Arc<AccessPolicy>,
}

impl<I> ItemLedgerService<I> {
    /// Build the ledger over an item store and the list registry.
    pub fn new(
        items: Arc<I>,
        lists: Arc<dyn ListRegistry>,
        categories: Arc<dyn CategoryDirectory>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            items,
            lists,
            categories,
            policy,
        }
    }
}

fn trimmed_text(raw: &str) -> Result<String, Error> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(Error::invalid_request("item text must not be empty"));
    }
    Ok(text.to_owned())
}

fn item_not_found(id: &ItemId) -> Error {
    Error::not_found(format!("item {id} not found"))
}

impl<I> ItemLedgerService<I>
where
    I: ItemRepository,
{
    async fn require_item(&self, id: &ItemId) -> Result<Item, Error> {
        self.items
            .find_by_id(id)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(id))
    }

    async fn require_edit(&self, list_id: &ListId, actor: &Uid) -> Result<(), Error> {
        if self.lists.can_edit(actor, list_id).await? {
            return Ok(());
        }
        Err(Error::forbidden("only collaborators may change items on this list"))
    }

    /// Register `tag` on the list's category. Failures never undo the item.
    async fn tag_category(&self, list_id: &ListId, tag: &str) {
        let outcome = match self.lists.find(list_id).await {
            Ok(list) => self
                .categories
                .add_sub_category_tag(&list.category_id, tag)
                .await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(()) => debug!(list_id = %list_id, tag, "sub-category recorded"),
            Err(err) => warn!(
                list_id = %list_id,
                tag,
                error = %err.message(),
                "failed to record sub-category on category"
            ),
        }
    }
}

#[async_trait]
impl<I> ItemLedger for ItemLedgerService<I>
where
    I: ItemRepository,
{
    async fn list_for_viewer(
        &self,
        list_id: &ListId,
        viewer: Option<Uid>,
    ) -> Result<Vec<ItemView>, Error> {
        let list = self.lists.find(list_id).await?;
        if !is_visible_to(&list, viewer.as_ref()) {
            return Err(Error::forbidden("list is not visible to this viewer"));
        }
        let items = self
            .items
            .list_by_list(list_id)
            .await
            .map_err(map_item_error)?;
        Ok(items
            .into_iter()
            .map(|item| item.view_for(viewer.as_ref()))
            .collect())
    }

    async fn create(
        &self,
        list_id: &ListId,
        new_item: NewItem,
        actor: &Uid,
    ) -> Result<ItemView, Error> {
        self.require_edit(list_id, actor).await?;
        let text = trimmed_text(&new_item.text)?;
        let (sub_category, supplied) = normalise_sub_category(new_item.sub_category.as_deref());

        let item = Item::new(*list_id, text, sub_category, actor.clone());
        self.items.insert(&item).await.map_err(map_item_error)?;
        info!(item_id = %item.id, list_id = %list_id, added_by = %actor, "item created");

        if supplied {
            self.tag_category(list_id, &item.sub_category).await;
        }
        Ok(item.view_for(Some(actor)))
    }

    async fn toggle_done(
        &self,
        item_id: &ItemId,
        actor: &Uid,
        done: bool,
    ) -> Result<ItemView, Error> {
        let item = self.require_item(item_id).await?;
        self.require_edit(&item.list_id, actor).await?;
        let updated = self
            .items
            .set_done(item_id, actor, done)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(item_id))?;
        debug!(item_id = %item_id, uid = %actor, done, "completion toggled");
        Ok(updated.view_for(Some(actor)))
    }

    async fn update_fields(
        &self,
        item_id: &ItemId,
        actor: &Uid,
        patch: ItemPatch,
    ) -> Result<ItemView, Error> {
        let mut item = self.require_item(item_id).await?;
        if !self.policy.may_edit_item_fields(actor, &item) {
            return Err(Error::forbidden("only the item's creator may edit it"));
        }
        if let Some(text) = &patch.text {
            item.text = trimmed_text(text)?;
        }
        let mut new_tag = None;
        if let Some(raw) = &patch.sub_category {
            let (sub_category, supplied) = normalise_sub_category(Some(raw));
            item.sub_category = sub_category;
            if supplied {
                new_tag = Some(item.sub_category.clone());
            }
        }

        let updated = self
            .items
            .update_fields(&item)
            .await
            .map_err(map_item_error)?
            .ok_or_else(|| item_not_found(item_id))?;
        if let Some(tag) = new_tag {
            self.tag_category(&updated.list_id, &tag).await;
        }
        Ok(updated.view_for(Some(actor)))
    }

    async fn delete(&self, item_id: &ItemId, actor: &Uid) -> Result<(), Error> {
        let item = self.require_item(item_id).await?;
        let allowed = match self.lists.find(&item.list_id).await {
            Ok(list) => self.policy.may_delete_item(actor, &list, &item),
            Err(err) if err.code() == ErrorCode::NotFound => {
                debug!(item_id = %item_id, list_id = %item.list_id, "deleting orphaned item");
                self.policy.may_delete_orphan_item(actor, &item)
            }
            Err(err) => return Err(err),
        };
        if !allowed {
            return Err(Error::forbidden(
                "only the item's creator or the admin may delete it",
            ));
        }
        let removed = self.items.delete(item_id).await.map_err(map_item_error)?;
        if !removed {
            return Err(item_not_found(item_id));
        }
        info!(item_id = %item_id, actor = %actor, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
