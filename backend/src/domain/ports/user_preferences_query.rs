//! Driving port for user preferences queries.
//!
//! Implementations create default preferences when none have been stored.

use async_trait::async_trait;

use crate::domain::{Error, Uid, UserPreferences};

/// Domain use-case port for fetching user preferences.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesQuery: Send + Sync {
    /// Fetch preferences for the authenticated user.
    async fn fetch_preferences(&self, uid: &Uid) -> Result<UserPreferences, Error>;
}

/// Fixture query returning default preferences.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserPreferencesQuery;

#[async_trait]
impl UserPreferencesQuery for FixtureUserPreferencesQuery {
    async fn fetch_preferences(&self, uid: &Uid) -> Result<UserPreferences, Error> {
        Ok(UserPreferences::new_default(uid.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_returns_default_preferences() {
        let query = FixtureUserPreferencesQuery;
        let uid = Uid::new("dana").expect("uid");

        let prefs = query.fetch_preferences(&uid).await.expect("preferences");

        assert_eq!(prefs.uid, uid);
        assert!(prefs.show_public);
    }
}
