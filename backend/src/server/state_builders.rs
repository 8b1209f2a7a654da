//! Builders selecting store and identity adapters from settings.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use listshare::domain::AccessPolicy;
use listshare::domain::ports::{FixtureIdentityGateway, IdentityGateway};
use listshare::inbound::http::state::{HttpState, ServiceSettings, StorePorts};
use listshare::outbound::identity::HttpIdentityGateway;
use listshare::outbound::memory::MemoryStore;
use listshare::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselItemRepository, DieselListRepository,
    DieselUserPreferencesRepository, PoolConfig, run_migrations,
};

use super::config::AppSettings;

fn build_identity_gateway(settings: &AppSettings) -> Result<Arc<dyn IdentityGateway>> {
    match settings.identity_url()? {
        Some(base) => {
            info!(identity_url = %base, "using HTTP identity provider");
            let gateway = HttpIdentityGateway::new(base, settings.identity_timeout())
                .wrap_err("failed to build identity provider client")?;
            Ok(Arc::new(gateway))
        }
        None => {
            warn!("LISTSHARE_IDENTITY_URL unset; accepting fixture tokens (development only)");
            Ok(Arc::new(FixtureIdentityGateway::permissive()))
        }
    }
}

fn service_settings(settings: &AppSettings) -> Result<ServiceSettings> {
    let mut service_settings = ServiceSettings::new(AccessPolicy::new(settings.admin_uid()?));
    service_settings.seed_names = settings.default_categories();
    service_settings.enrichment_timeout = settings.enrichment_timeout();
    Ok(service_settings)
}

/// Compose the HTTP state, migrating the database first when one is
/// configured.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState> {
    let identity = build_identity_gateway(settings)?;
    let service_settings = service_settings(settings)?;

    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_migrations(database_url)
                .await
                .wrap_err("database migrations failed")?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .wrap_err("failed to build database pool")?;
            info!("using PostgreSQL store");
            Ok(HttpState::compose(
                StorePorts {
                    categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                    lists: Arc::new(DieselListRepository::new(pool.clone())),
                    items: Arc::new(DieselItemRepository::new(pool.clone())),
                    preferences: Arc::new(DieselUserPreferencesRepository::new(pool)),
                },
                identity,
                service_settings,
            ))
        }
        None => {
            warn!("LISTSHARE_DATABASE_URL unset; data is kept in memory only");
            let store = Arc::new(MemoryStore::new());
            Ok(HttpState::compose(
                StorePorts {
                    categories: Arc::clone(&store),
                    lists: Arc::clone(&store),
                    items: Arc::clone(&store),
                    preferences: store,
                },
                identity,
                service_settings,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(admin: Option<&str>) -> AppSettings {
        AppSettings {
            admin_uid: admin.map(str::to_owned),
            bind_addr: None,
            database_url: None,
            identity_url: None,
            identity_timeout_ms: None,
            enrichment_timeout_ms: Some(100),
            cors_origin: None,
            default_categories: Some("Films".to_owned()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_seeds_configured_categories() {
        let state = build_http_state(&settings(Some("admin")))
            .await
            .expect("state");

        assert_eq!(state.categories.seed_defaults().await.expect("seed"), 1);
        let names: Vec<String> = state
            .categories
            .list_public()
            .await
            .expect("categories")
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Films"]);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_admin_uid_is_fatal() {
        let result = build_http_state(&settings(None)).await;
        assert!(result.is_err());
    }
}
