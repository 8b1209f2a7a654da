//! PostgreSQL-backed `UserPreferencesRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPreferencesRepository, UserPreferencesRepositoryError};
use crate::domain::{Uid, UserPreferences};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserPreferencesRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_preferences;

/// Diesel-backed implementation of the `UserPreferencesRepository` port.
///
/// Saves are `INSERT ... ON CONFLICT (uid) DO UPDATE`, so the last writer
/// wins.
#[derive(Clone)]
pub struct DieselUserPreferencesRepository {
    pool: DbPool,
}

impl DieselUserPreferencesRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPreferencesRepositoryError {
    map_pool_error(error, |message| {
        UserPreferencesRepositoryError::connection(message)
    })
}

fn diesel_error(error: diesel::result::Error) -> UserPreferencesRepositoryError {
    map_diesel_error(
        error,
        UserPreferencesRepositoryError::query,
        UserPreferencesRepositoryError::connection,
    )
}

#[async_trait]
impl UserPreferencesRepository for DieselUserPreferencesRepository {
    async fn find_by_uid(
        &self,
        uid: &Uid,
    ) -> Result<Option<UserPreferences>, UserPreferencesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserPreferencesRow> = user_preferences::table
            .find(uid.as_ref())
            .select(UserPreferencesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(UserPreferences::try_from)
            .transpose()
            .map_err(UserPreferencesRepositoryError::query)
    }

    async fn save(
        &self,
        preferences: &UserPreferences,
    ) -> Result<(), UserPreferencesRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(user_preferences::table)
            .values(UserPreferencesRow::from(preferences))
            .on_conflict(user_preferences::uid)
            .do_update()
            .set((
                user_preferences::show_public.eq(excluded(user_preferences::show_public)),
                user_preferences::updated_at.eq(excluded(user_preferences::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            UserPreferencesRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(
            repo_err,
            UserPreferencesRepositoryError::Query { .. }
        ));
        assert!(repo_err.to_string().contains("record not found"));
    }
}
