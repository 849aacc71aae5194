use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetly_core::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use budgetly_core::utils::time_utils::now_utc;
use budgetly_core::Result;

use super::model::{to_domain, CategoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;
use crate::schema::categories::dsl::*;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn list_categories(&self, owner_id: &str, month_filter: Option<&str>) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = categories::table
            .filter(user_id.eq(owner_id))
            .into_boxed();
        if let Some(m) = month_filter {
            query = query.filter(month.eq(m.to_string()));
        }

        let rows = query
            .select(CategoryDB::as_select())
            .order((created_at.asc(), id.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(to_domain(rows)?)
    }

    fn get_category(&self, owner_id: &str, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories
            .filter(id.eq(category_id))
            .filter(user_id.eq(owner_id))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Category::try_from).transpose()?)
    }

    async fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = CategoryDB::from_new(Uuid::now_v7().to_string(), new_category, now_utc());
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::try_from(inserted)?)
            })
            .await
    }

    async fn update_category(
        &self,
        owner_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>> {
        let owner_id = owner_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<Category>> {
                let updated = diesel::update(
                    categories
                        .filter(id.eq(&category_id))
                        .filter(user_id.eq(&owner_id)),
                )
                .set((
                    name.eq(update.name),
                    color.eq(update.color),
                    spend_limit.eq(update.limit.to_string()),
                    updated_at.eq(now_utc()),
                ))
                .returning(CategoryDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?;
                Ok(updated.map(Category::try_from).transpose()?)
            })
            .await
    }

    async fn delete_category(&self, owner_id: &str, category_id: &str) -> Result<usize> {
        let owner_id = owner_id.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // expenses go with it through ON DELETE CASCADE
                Ok(diesel::delete(
                    categories
                        .filter(id.eq(category_id))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
