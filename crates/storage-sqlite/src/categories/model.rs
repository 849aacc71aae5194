//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use budgetly_core::categories::{Category, NewCategory};

use crate::errors::StorageError;

/// Database model for categories. The limit is stored as decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub spend_limit: String,
    pub month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CategoryDB {
    pub fn from_new(id: String, domain: NewCategory, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: domain.user_id,
            name: domain.name,
            color: domain.color,
            spend_limit: domain.limit.to_string(),
            month: domain.month,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<CategoryDB> for Category {
    type Error = StorageError;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        let limit = Decimal::from_str(&db.spend_limit).map_err(|e| {
            StorageError::Corrupt(format!("category {} limit '{}': {}", db.id, db.spend_limit, e))
        })?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            color: db.color,
            limit,
            month: db.month,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

pub(crate) fn to_domain(rows: Vec<CategoryDB>) -> Result<Vec<Category>, StorageError> {
    rows.into_iter().map(Category::try_from).collect()
}
