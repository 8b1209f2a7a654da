//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    CategoryDirectory, CategoryRepository, IdentityGateway, ItemLedger, ItemRepository,
    ListRegistry, ListRepository, ListsQuery, UserPreferencesCommand, UserPreferencesQuery,
    UserPreferencesRepository,
};
use crate::domain::{
    AccessPolicy, CategoryDirectoryService, DEFAULT_ENRICHMENT_TIMEOUT, ItemLedgerService,
    ListRegistryService, UserPreferencesService, VisibilityResolverService,
};

/// Dependency bundle for HTTP handlers.
///
/// The identity gateway is held here so the bearer-token extractors can
/// verify credentials before a handler runs.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoryDirectory>,
    pub lists: Arc<dyn ListRegistry>,
    pub lists_query: Arc<dyn ListsQuery>,
    pub items: Arc<dyn ItemLedger>,
    pub preferences: Arc<dyn UserPreferencesCommand>,
    pub preferences_query: Arc<dyn UserPreferencesQuery>,
    pub identity: Arc<dyn IdentityGateway>,
}

/// Driven adapters backing the domain services.
///
/// The in-memory store passes the same `Arc` for every field.
pub struct StorePorts<C, L, I, P> {
    pub categories: Arc<C>,
    pub lists: Arc<L>,
    pub items: Arc<I>,
    pub preferences: Arc<P>,
}

/// Process-wide settings shared read-only by the services.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub policy: Arc<AccessPolicy>,
    pub seed_names: Vec<String>,
    pub enrichment_timeout: Duration,
}

impl ServiceSettings {
    /// Settings with the default seed names and enrichment timeout.
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            seed_names: crate::domain::DEFAULT_SEED_CATEGORIES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }
}

impl HttpState {
    /// Compose the domain services over the given stores and gateway.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use listshare::domain::ports::FixtureIdentityGateway;
    /// use listshare::domain::{AccessPolicy, Uid};
    /// use listshare::inbound::http::state::{HttpState, ServiceSettings, StorePorts};
    /// use listshare::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let admin = Uid::new("admin").expect("uid");
    /// let state = HttpState::compose(
    ///     StorePorts {
    ///         categories: Arc::clone(&store),
    ///         lists: Arc::clone(&store),
    ///         items: Arc::clone(&store),
    ///         preferences: store,
    ///     },
    ///     Arc::new(FixtureIdentityGateway::permissive()),
    ///     ServiceSettings::new(AccessPolicy::new(admin)),
    /// );
    /// let _lists = state.lists.clone();
    /// ```
    pub fn compose<C, L, I, P>(
        stores: StorePorts<C, L, I, P>,
        identity: Arc<dyn IdentityGateway>,
        settings: ServiceSettings,
    ) -> Self
    where
        C: CategoryRepository + 'static,
        L: ListRepository + 'static,
        I: ItemRepository + 'static,
        P: UserPreferencesRepository + 'static,
    {
        let StorePorts {
            categories: category_repo,
            lists: list_repo,
            items: item_repo,
            preferences: preferences_repo,
        } = stores;
        let ServiceSettings {
            policy,
            seed_names,
            enrichment_timeout,
        } = settings;

        let categories: Arc<dyn CategoryDirectory> =
            Arc::new(CategoryDirectoryService::with_seed_names(
                Arc::clone(&category_repo),
                Arc::clone(&policy),
                seed_names,
            ));
        let lists: Arc<dyn ListRegistry> = Arc::new(ListRegistryService::new(
            Arc::clone(&list_repo),
            Arc::clone(&item_repo),
            Arc::clone(&categories),
            Arc::clone(&identity),
            Arc::clone(&policy),
        ));
        let items: Arc<dyn ItemLedger> = Arc::new(ItemLedgerService::new(
            item_repo,
            Arc::clone(&lists),
            Arc::clone(&categories),
            policy,
        ));
        let lists_query: Arc<dyn ListsQuery> = Arc::new(
            VisibilityResolverService::new(list_repo, category_repo, Arc::clone(&identity))
                .with_enrichment_timeout(enrichment_timeout),
        );
        let preferences_service = Arc::new(UserPreferencesService::new(preferences_repo));

        Self {
            categories,
            lists,
            lists_query,
            items,
            preferences: preferences_service.clone(),
            preferences_query: preferences_service,
            identity,
        }
    }
}
