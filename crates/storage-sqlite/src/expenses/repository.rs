use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use budgetly_core::expenses::{
    Expense, ExpenseRepositoryTrait, NewExpense, TrackedExpense,
};
use budgetly_core::utils::money::checked_add;
use budgetly_core::utils::time_utils::now_utc;
use budgetly_core::{MonthRange, Result};

use super::model::{parse_amount, to_domain, ExpenseDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::expenses;
use crate::schema::expenses::dsl::*;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

/// Sums the amounts already booked against one category inside a window.
fn category_spend_in_window(
    conn: &mut SqliteConnection,
    target_category: &str,
    window: &MonthRange,
) -> Result<Decimal> {
    let rows: Vec<(String, String)> = expenses
        .filter(category_id.eq(target_category))
        .filter(expense_date.ge(window.start))
        .filter(expense_date.lt(window.end))
        .select((id, amount))
        .load(conn)
        .map_err(StorageError::from)?;

    rows.iter().try_fold(Decimal::ZERO, |total, (row_id, raw)| {
        checked_add(total, parse_amount(raw, row_id)?)
    })
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list_expenses_in_range(&self, owner_id: &str, range: &MonthRange) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses
            .filter(user_id.eq(owner_id))
            .filter(expense_date.ge(range.start))
            .filter(expense_date.lt(range.end))
            .select(ExpenseDB::as_select())
            .order((expense_date.desc(), created_at.desc()))
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(to_domain(rows)?)
    }

    fn list_recent_expenses(&self, owner_id: &str, limit: i64) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses
            .filter(user_id.eq(owner_id))
            .select(ExpenseDB::as_select())
            .order((expense_date.desc(), created_at.desc()))
            .limit(limit)
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(to_domain(rows)?)
    }

    fn sum_spend_by_category(
        &self,
        owner_id: &str,
        range: &MonthRange,
    ) -> Result<HashMap<String, Decimal>> {
        let mut conn = get_connection(&self.pool)?;
        // Amounts are decimal text, so they are summed here rather than with SQL SUM.
        let rows: Vec<(String, String, String)> = expenses
            .filter(user_id.eq(owner_id))
            .filter(expense_date.ge(range.start))
            .filter(expense_date.lt(range.end))
            .select((id, category_id, amount))
            .load(&mut conn)
            .map_err(StorageError::from)?;

        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for (row_id, row_category, raw) in rows {
            let value = parse_amount(&raw, &row_id)?;
            let total = totals.entry(row_category).or_insert(Decimal::ZERO);
            *total = checked_add(*total, value)?;
        }
        Ok(totals)
    }

    async fn insert_tracked_expense(
        &self,
        new_expense: NewExpense,
        window: MonthRange,
    ) -> Result<TrackedExpense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TrackedExpense> {
                let spent_before =
                    category_spend_in_window(conn, &new_expense.category_id, &window)?;

                let row = ExpenseDB::from_new(Uuid::now_v7().to_string(), new_expense, now_utc());
                let inserted = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;

                Ok(TrackedExpense {
                    expense: Expense::try_from(inserted)?,
                    spent_before,
                })
            })
            .await
    }

    async fn delete_expense(&self, owner_id: &str, expense_id: &str) -> Result<usize> {
        let owner_id = owner_id.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    expenses
                        .filter(id.eq(expense_id))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
