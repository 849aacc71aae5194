use std::collections::HashMap;

use crate::errors::Result;
use crate::expenses::expenses_model::{
    Expense, ExpenseCreated, ExpenseInput, NewExpense, TrackedExpense,
};
use crate::utils::month::MonthRange;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// The owner's expenses dated inside `range`, newest first.
    fn list_expenses_in_range(&self, user_id: &str, range: &MonthRange) -> Result<Vec<Expense>>;

    /// The owner's most recent expenses by date, newest first.
    fn list_recent_expenses(&self, user_id: &str, limit: i64) -> Result<Vec<Expense>>;

    /// Sum of the owner's expense amounts inside `range`, keyed by category id.
    /// Categories without expenses are absent from the map.
    fn sum_spend_by_category(
        &self,
        user_id: &str,
        range: &MonthRange,
    ) -> Result<HashMap<String, Decimal>>;

    /// Inserts an expense and reports what its category had already spent
    /// inside `window`. The sum and the insert must not interleave with other
    /// writes.
    async fn insert_tracked_expense(
        &self,
        new_expense: NewExpense,
        window: MonthRange,
    ) -> Result<TrackedExpense>;

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    async fn add_expense(&self, user_id: &str, input: ExpenseInput) -> Result<ExpenseCreated>;
    fn list_month_expenses(&self, user_id: &str, month: &str) -> Result<Vec<Expense>>;
    fn list_recent_expenses(&self, user_id: &str, limit: Option<i64>) -> Result<Vec<Expense>>;
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()>;
}
