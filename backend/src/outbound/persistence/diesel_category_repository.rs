//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Case-insensitive name uniqueness is enforced by the unique index on
//! `lower(name)`; violations surface as `DuplicateName`. Tag appends run as a
//! single guarded `UPDATE`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Category, CategoryId};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

diesel::define_sql_function! {
    /// SQL `lower(text)`.
    fn lower(value: Text) -> Text;
}

const APPEND_TAG_SQL: &str = "UPDATE categories \
     SET sub_category_tags = array_append(sub_category_tags, $2) \
     WHERE id = $1 \
       AND NOT EXISTS ( \
         SELECT 1 FROM unnest(sub_category_tags) AS tag WHERE lower(tag) = lower($2) \
       )";

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CategoryRepositoryError {
    map_pool_error(error, |message| CategoryRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        CategoryRepositoryError::query,
        CategoryRepositoryError::connection,
    )
}

fn name_error(error: diesel::result::Error, name: &str) -> CategoryRepositoryError {
    if is_unique_violation(&error) {
        return CategoryRepositoryError::duplicate_name(name);
    }
    diesel_error(error)
}

fn to_domain(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    Category::try_from(row).map_err(CategoryRepositoryError::query)
}

fn to_domain_all(rows: Vec<CategoryRow>) -> Result<Vec<Category>, CategoryRepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_by_id(
        &self,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        categories::table
            .find(*id.as_uuid())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        categories::table
            .filter(lower(categories::name).eq(lower(name)))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(categories::table)
            .values(NewCategoryRow::from(category))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| name_error(err, &category.name))
    }

    async fn rename(
        &self,
        id: &CategoryId,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(categories::table.find(*id.as_uuid()))
            .set(categories::name.eq(name))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| name_error(err, name))?
            .map(to_domain)
            .transpose()
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(categories::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn append_tag_if_absent(
        &self,
        id: &CategoryId,
        tag: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::sql_query(APPEND_TAG_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<Text, _>(tag.to_owned())
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        categories::table
            .find(*id.as_uuid())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn list_public(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = categories::table
            .filter(categories::is_public.eq(true))
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_domain_all(rows)
    }

    async fn find_many(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = categories::table
            .filter(categories::id.eq_any(uuids))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_domain_all(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn checkout_failures_map_to_connection() {
        let err = pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, CategoryRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn other_diesel_errors_keep_query_semantics() {
        let err = name_error(diesel::result::Error::NotFound, "Movies");
        assert!(matches!(err, CategoryRepositoryError::Query { .. }));
    }
}
