//! `UserPreferencesRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{UserPreferencesRepository, UserPreferencesRepositoryError};
use crate::domain::{Uid, UserPreferences};

use super::{MemoryStore, lock};

#[async_trait]
impl UserPreferencesRepository for MemoryStore {
    async fn find_by_uid(
        &self,
        uid: &Uid,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError> {
        let preferences =
            lock(&self.preferences).map_err(UserPreferencesRepositoryError::query)?;
        Ok(preferences.get(uid).cloned())
    }

    async fn save(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), UserPreferencesRepositoryError> {
        let mut stored =
            lock(&self.preferences).map_err(UserPreferencesRepositoryError::query)?;
        stored.insert(preferences.uid.clone(), preferences.clone());
        Ok(())
    }
}
