//! Expense domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing a single spend record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// What a caller submits when logging an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub category_id: String,
    pub amount: Decimal,
    pub date: Option<NaiveDateTime>,
}

/// Fully resolved expense ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
}

/// An inserted expense together with the category's spend inside the
/// evaluated window, measured before the insert.
#[derive(Debug, Clone)]
pub struct TrackedExpense {
    pub expense: Expense,
    pub spent_before: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Over,
    Within,
}

impl BudgetStatus {
    /// Over budget means strictly above the limit.
    pub fn evaluate(spent: Decimal, limit: Decimal) -> Self {
        if spent > limit {
            BudgetStatus::Over
        } else {
            BudgetStatus::Within
        }
    }
}

/// Result of logging an expense: the record plus its advisory budget status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreated {
    pub status: BudgetStatus,
    pub expense: Expense,
}
