//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! `set_done` adds or removes exactly one uid from `done_by` in a single
//! `UPDATE`; other users' completion is never rewritten.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, ListId, Uid};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ItemFieldsUpdate, ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

const MARK_DONE_SQL: &str = "UPDATE items \
     SET done_by = array_append(done_by, $2) \
     WHERE id = $1 AND NOT ($2 = ANY(done_by))";

const MARK_UNDONE_SQL: &str = "UPDATE items \
     SET done_by = array_remove(done_by, $2) \
     WHERE id = $1";

/// Diesel-backed implementation of the `ItemRepository` port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ItemRepositoryError {
    map_pool_error(error, |message| ItemRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> ItemRepositoryError {
    map_diesel_error(
        error,
        ItemRepositoryError::query,
        ItemRepositoryError::connection,
    )
}

fn to_domain(row: ItemRow) -> Result<Item, ItemRepositoryError> {
    Item::try_from(row).map_err(ItemRepositoryError::query)
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        items::table
            .find(*id.as_uuid())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn insert(&self, item: &Item) -> Result<(), ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(items::table)
            .values(NewItemRow::from(item))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_by_list(&self, list_id: &ListId) -> Result<Vec<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = items::table
            .filter(items::list_id.eq(*list_id.as_uuid()))
            .order(items::created_at.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn update_fields(&self, item: &Item) -> Result<Option<Item>, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ItemFieldsUpdate {
            text: &item.text,
            sub_category: &item.sub_category,
        };
        diesel::update(items::table.find(*item.id.as_uuid()))
            .set(&changes)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn set_done(
        &self,
        id: &ItemId,
        uid: &Uid,
        done: bool,
    ) -> Result<Option<Item>, ItemRepositoryError> {
        let sql = if done { MARK_DONE_SQL } else { MARK_UNDONE_SQL };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::sql_query(sql)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<Text, _>(uid.as_ref().to_owned())
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        items::table
            .find(*id.as_uuid())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(items::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn delete_by_list(&self, list_id: &ListId) -> Result<u64, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(items::table.filter(items::list_id.eq(*list_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed as u64)
    }

    async fn count_foreign(
        &self,
        list_id: &ListId,
        owner: &Uid,
    ) -> Result<u64, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let count: i64 = items::table
            .filter(items::list_id.eq(*list_id.as_uuid()))
            .filter(items::added_by.ne(owner.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(count_to_u64(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(7, 7)]
    #[case(-1, 0)]
    fn counts_never_go_negative(#[case] raw: i64, #[case] expected: u64) {
        assert_eq!(count_to_u64(raw), expected);
    }

    #[rstest]
    fn done_toggles_touch_a_single_uid() {
        assert!(MARK_DONE_SQL.contains("array_append(done_by, $2)"));
        assert!(MARK_UNDONE_SQL.contains("array_remove(done_by, $2)"));
    }
}
