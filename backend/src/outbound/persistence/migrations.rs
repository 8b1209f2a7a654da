//! Embedded schema migrations applied at startup.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::pool::PoolError;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply all pending migrations against `database_url`.
///
/// Diesel's migration harness is synchronous, so the work runs on the
/// blocking thread pool.
pub async fn run_migrations(database_url: &str) -> Result<(), PoolError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || migrate(&url))
        .await
        .map_err(|err| PoolError::migration(format!("migration task failed: {err}")))?
}

fn migrate(url: &str) -> Result<(), PoolError> {
    let mut conn =
        PgConnection::establish(url).map_err(|err| PoolError::build(format!("{err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::migration(format!("{err}")))?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;
    use rstest::rstest;

    #[rstest]
    fn embedded_migrations_are_discoverable() {
        let migrations =
            MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded migrations");
        assert!(!migrations.is_empty());
    }

    #[tokio::test]
    async fn unreachable_database_reports_build_error() {
        let err = run_migrations("postgres://nobody@127.0.0.1:1/none")
            .await
            .expect_err("connection should fail");
        assert!(matches!(err, PoolError::Build { .. }));
    }
}
