use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use budgetly_core::users::{NewUser, User, UserRepositoryTrait};
use budgetly_core::utils::time_utils::now_utc;
use budgetly_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_user_by_email(&self, email_value: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users
            .filter(email.eq(email_value))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::from))
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users
            .find(user_id)
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(User::from))
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = UserDB::from_new(Uuid::now_v7().to_string(), new_user, now_utc());
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(inserted))
            })
            .await
    }
}
