//! User preferences domain service.
//!
//! Implements the preferences driving ports. Defaults are created lazily on
//! first read; updates are upserts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::repository_errors::map_preferences_error;
use crate::domain::ports::{
    UpdatePreferencesRequest, UserPreferencesCommand, UserPreferencesQuery,
    UserPreferencesRepository,
};
use crate::domain::{Error, Uid, UserPreferences};

/// User preferences service implementing the driving ports.
#[derive(Clone)]
pub struct UserPreferencesService<P> {
    preferences_repo: Arc<P>,
}

impl<P> UserPreferencesService<P> {
    /// Create a new service with the given repository.
    pub fn new(preferences_repo: Arc<P>) -> Self {
        Self { preferences_repo }
    }
}

impl<P> UserPreferencesService<P>
where
    P: UserPreferencesRepository,
{
    async fn fetch_or_create_defaults(&self, uid: &Uid) -> Result<UserPreferences, Error> {
        if let Some(preferences) = self
            .preferences_repo
            .find_by_uid(uid)
            .await
            .map_err(map_preferences_error)?
        {
            return Ok(preferences);
        }

        let defaults = UserPreferences::new_default(uid.clone());
        self.preferences_repo
            .save(&defaults)
            .await
            .map_err(map_preferences_error)?;
        debug!(uid = %uid, "default preferences created");
        Ok(defaults)
    }
}

#[async_trait]
impl<P> UserPreferencesQuery for UserPreferencesService<P>
where
    P: UserPreferencesRepository,
{
    async fn fetch_preferences(&self, uid: &Uid) -> Result<UserPreferences, Error> {
        self.fetch_or_create_defaults(uid).await
    }
}

#[async_trait]
impl<P> UserPreferencesCommand for UserPreferencesService<P>
where
    P: UserPreferencesRepository,
{
    async fn update(&self, request: UpdatePreferencesRequest) -> Result<UserPreferences, Error> {
        let preferences = UserPreferences::new(request.uid, request.show_public);
        self.preferences_repo
            .save(&preferences)
            .await
            .map_err(map_preferences_error)?;
        Ok(preferences)
    }
}

#[cfg(test)]
#[path = "preferences_service_tests.rs"]
mod tests;
