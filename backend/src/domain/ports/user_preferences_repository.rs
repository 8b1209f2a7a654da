//! Port for user preferences persistence.
//!
//! Preferences are keyed by uid and written with last-write-wins upserts.

use async_trait::async_trait;

use crate::domain::{Uid, UserPreferences};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user preferences repository adapters.
    pub enum UserPreferencesRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "preferences repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "preferences repository query failed: {message}",
    }
}

/// Port for user preferences storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesRepository: Send + Sync {
    /// Fetch preferences for a user.
    ///
    /// Returns `None` if the user never saved preferences. Callers create the
    /// defaults.
    async fn find_by_uid(
        &self,
        uid: &Uid,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError>;

    /// Insert or replace the stored preferences.
    async fn save(&self, preferences: &UserPreferences)
    -> Result<(), UserPreferencesRepositoryError>;
}

/// Fixture implementation for tests that do not exercise preferences.
///
/// Lookups always miss and saves are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserPreferencesRepository;

#[async_trait]
impl UserPreferencesRepository for FixtureUserPreferencesRepository {
    async fn find_by_uid(
        &self,
        _uid: &Uid,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError> {
        Ok(None)
    }

    async fn save(
        &self,
        _preferences: &UserPreferences,
    ) -> Result<(), UserPreferencesRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_lookup_returns_none() {
        let repo = FixtureUserPreferencesRepository;
        let uid = Uid::new("alice").expect("uid");

        let result = repo.find_by_uid(&uid).await.expect("fixture lookup");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fixture_repository_accepts_saves() {
        let repo = FixtureUserPreferencesRepository;
        let prefs = UserPreferences::new(Uid::new("alice").expect("uid"), false);

        repo.save(&prefs).await.expect("fixture save");
    }
}
