//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use budgetly_core::users::{NewUser, User};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl UserDB {
    pub fn from_new(id: String, domain: NewUser, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: domain.name,
            email: domain.email,
            password_hash: domain.password_hash,
            created_at: now,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            password_hash: db.password_hash,
            created_at: db.created_at,
        }
    }
}
