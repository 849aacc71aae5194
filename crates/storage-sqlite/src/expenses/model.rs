//! Database model for expenses.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use budgetly_core::expenses::{Expense, NewExpense};

use crate::errors::StorageError;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: String,
    pub expense_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl ExpenseDB {
    pub fn from_new(id: String, domain: NewExpense, now: NaiveDateTime) -> Self {
        Self {
            id,
            user_id: domain.user_id,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            expense_date: domain.date,
            created_at: now,
        }
    }
}

pub(crate) fn parse_amount(raw: &str, expense_id: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::Corrupt(format!("expense {} amount '{}': {}", expense_id, raw, e)))
}

impl TryFrom<ExpenseDB> for Expense {
    type Error = StorageError;

    fn try_from(db: ExpenseDB) -> Result<Self, Self::Error> {
        let amount = parse_amount(&db.amount, &db.id)?;
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            amount,
            date: db.expense_date,
            created_at: db.created_at,
        })
    }
}

pub(crate) fn to_domain(rows: Vec<ExpenseDB>) -> Result<Vec<Expense>, StorageError> {
    rows.into_iter().map(Expense::try_from).collect()
}
