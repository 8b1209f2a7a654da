//! PostgreSQL-backed `ListRepository` implementation using Diesel ORM.
//!
//! Collaborator changes are single `UPDATE` statements using `array_append`
//! guarded by a membership test, or `array_remove`, so concurrent invitations
//! never overwrite each other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ListRepository, ListRepositoryError};
use crate::domain::{ListId, SharedList, Uid};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ListMetadataUpdate, ListRow, NewListRow};
use super::pool::{DbPool, PoolError};
use super::schema::shared_lists;

const ADD_COLLABORATOR_SQL: &str = "UPDATE shared_lists \
     SET collaborators = array_append(collaborators, $2) \
     WHERE id = $1 AND NOT ($2 = ANY(collaborators))";

const REMOVE_COLLABORATOR_SQL: &str = "UPDATE shared_lists \
     SET collaborators = array_remove(collaborators, $2) \
     WHERE id = $1";

/// Diesel-backed implementation of the `ListRepository` port.
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn apply_collaborator_change(
        &self,
        sql: &'static str,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::sql_query(sql)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<Text, _>(uid.as_ref().to_owned())
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        load_one(&mut conn, id).await
    }
}

fn pool_error(error: PoolError) -> ListRepositoryError {
    map_pool_error(error, |message| ListRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> ListRepositoryError {
    map_diesel_error(
        error,
        ListRepositoryError::query,
        ListRepositoryError::connection,
    )
}

fn to_domain(row: ListRow) -> Result<SharedList, ListRepositoryError> {
    SharedList::try_from(row).map_err(ListRepositoryError::query)
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: &ListId,
) -> Result<Option<SharedList>, ListRepositoryError> {
    shared_lists::table
        .find(*id.as_uuid())
        .select(ListRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(diesel_error)?
        .map(to_domain)
        .transpose()
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn find_by_id(&self, id: &ListId) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        load_one(&mut conn, id).await
    }

    async fn insert(&self, list: &SharedList) -> Result<(), ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(shared_lists::table)
            .values(NewListRow::from(list))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update_metadata(
        &self,
        list: &SharedList,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ListMetadataUpdate {
            title: &list.title,
            category_id: *list.category_id.as_uuid(),
            is_public: list.is_public,
            updated_at: list.updated_at,
        };
        diesel::update(shared_lists::table.find(*list.id.as_uuid()))
            .set(&changes)
            .returning(ListRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn delete(&self, id: &ListId) -> Result<bool, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(shared_lists::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn add_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        self.apply_collaborator_change(ADD_COLLABORATOR_SQL, id, uid)
            .await
    }

    async fn remove_collaborator(
        &self,
        id: &ListId,
        uid: &Uid,
    ) -> Result<Option<SharedList>, ListRepositoryError> {
        self.apply_collaborator_change(REMOVE_COLLABORATOR_SQL, id, uid)
            .await
    }

    async fn list_visible_to(
        &self,
        viewer: Option<Uid>,
    ) -> Result<Vec<SharedList>, ListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = shared_lists::table
            .select(ListRow::as_select())
            .order(shared_lists::created_at.desc())
            .into_boxed();
        query = match viewer {
            Some(uid) => {
                let uid = String::from(uid);
                query.filter(
                    shared_lists::is_public
                        .eq(true)
                        .or(shared_lists::owner_uid.eq(uid.clone()))
                        .or(shared_lists::collaborators.contains(vec![uid])),
                )
            }
            None => query.filter(shared_lists::is_public.eq(true)),
        };

        let rows = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection() {
        let err = pool_error(PoolError::build("bad url"));
        assert!(matches!(err, ListRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn collaborator_add_is_guarded_by_membership() {
        assert!(ADD_COLLABORATOR_SQL.contains("NOT ($2 = ANY(collaborators))"));
        assert!(REMOVE_COLLABORATOR_SQL.contains("array_remove"));
    }
}
