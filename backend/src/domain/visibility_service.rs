//! Visibility resolver service.
//!
//! Answers "which lists can this viewer see" in two phases. Loading the lists
//! is authoritative and its failures surface. Enriching them with profiles
//! and category names is best-effort: a slow or failing identity provider or
//! category lookup degrades the response to bare uids instead of failing it.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::warn;

use super::repository_errors::map_list_error;
use crate::domain::ports::{CategoryRepository, IdentityGateway, ListRepository, ListsQuery};
use crate::domain::{CategoryId, Error, ListView, SharedList, Uid, UserProfile, is_visible_to};

/// Upper bound on profile and category enrichment per request.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(2);

/// Read model for visible lists.
#[derive(Clone)]
pub struct VisibilityResolverService<L, C> {
    lists: Arc<L>,
    categories: Arc<C>,
    identity: Arc<dyn IdentityGateway>,
    enrichment_timeout: Duration,
}

impl<L, C> VisibilityResolverService<L, C> {
    /// Build a resolver with the default enrichment timeout.
    pub fn new(lists: Arc<L>, categories: Arc<C>, identity: Arc<dyn IdentityGateway>) -> Self {
        Self {
            lists,
            categories,
            identity,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    /// Override the enrichment bound.
    pub fn with_enrichment_timeout(mut self, enrichment_timeout: Duration) -> Self {
        self.enrichment_timeout = enrichment_timeout;
        self
    }
}

impl<L, C> VisibilityResolverService<L, C>
where
    L: ListRepository,
    C: CategoryRepository,
{
    async fn profiles_for(&self, lists: &[SharedList]) -> HashMap<Uid, UserProfile> {
        let uids: Vec<Uid> = lists
            .iter()
            .flat_map(|list| std::iter::once(&list.owner_uid).chain(list.collaborators.iter()))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if uids.is_empty() {
            return HashMap::new();
        }

        match timeout(self.enrichment_timeout, self.identity.get_users_by_uid(&uids)).await {
            Ok(Ok(profiles)) => profiles,
            Ok(Err(err)) => {
                warn!(error = %err, "profile enrichment failed; returning bare uids");
                HashMap::new()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.enrichment_timeout.as_millis(),
                    "profile enrichment timed out; returning bare uids"
                );
                HashMap::new()
            }
        }
    }

    async fn category_names_for(&self, lists: &[SharedList]) -> HashMap<CategoryId, String> {
        let ids: Vec<CategoryId> = lists
            .iter()
            .map(|list| list.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return HashMap::new();
        }

        match timeout(self.enrichment_timeout, self.categories.find_many(&ids)).await {
            Ok(Ok(categories)) => categories
                .into_iter()
                .map(|category| (category.id, category.name))
                .collect(),
            Ok(Err(err)) => {
                warn!(error = %err, "category enrichment failed; omitting names");
                HashMap::new()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.enrichment_timeout.as_millis(),
                    "category enrichment timed out; omitting names"
                );
                HashMap::new()
            }
        }
    }
}

fn profile_or_bare(profiles: &HashMap<Uid, UserProfile>, uid: &Uid) -> UserProfile {
    profiles
        .get(uid)
        .cloned()
        .unwrap_or_else(|| UserProfile::bare(uid.clone()))
}

#[async_trait]
impl<L, C> ListsQuery for VisibilityResolverService<L, C>
where
    L: ListRepository,
    C: CategoryRepository,
{
    async fn lists_visible_to(
        &self,
        viewer: Option<Uid>,
        category: Option<CategoryId>,
    ) -> Result<Vec<ListView>, Error> {
        let mut lists = self
            .lists
            .list_visible_to(viewer.clone())
            .await
            .map_err(map_list_error)?;
        lists.retain(|list| {
            is_visible_to(list, viewer.as_ref())
                && category.is_none_or(|wanted| list.category_id == wanted)
        });
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (profiles, names) =
            tokio::join!(self.profiles_for(&lists), self.category_names_for(&lists));

        Ok(lists
            .into_iter()
            .map(|list| ListView {
                category_name: names.get(&list.category_id).cloned(),
                owner: profile_or_bare(&profiles, &list.owner_uid),
                collaborators: list
                    .collaborators
                    .iter()
                    .map(|uid| profile_or_bare(&profiles, uid))
                    .collect(),
                list,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "visibility_service_tests.rs"]
mod tests;
