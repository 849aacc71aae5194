use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use budgetly_core::categories as core_categories;
use budgetly_core::errors::ValidationError;
use budgetly_core::expenses as core_expenses;
use budgetly_core::summary as core_summary;
use budgetly_core::users as core_users;
use budgetly_core::utils::time_utils::parse_expense_date;

fn missing(field: &str) -> budgetly_core::Error {
    ValidationError::MissingField(field.to_string()).into()
}

pub(crate) fn present(value: Option<String>, field: &str) -> budgetly_core::Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    #[schema(value_type = f64)]
    pub limit: Decimal,
    #[schema(example = "2025-06")]
    pub month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_categories::Category> for Category {
    fn from(c: core_categories::Category) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            color: c.color,
            limit: c.limit,
            month: c.month,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Body of `POST /categories`. Fields are optional so a missing one is a 400, not a rejection.
#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub limit: Option<Decimal>,
    pub month: Option<String>,
}

impl NewCategory {
    pub fn into_core(self, user_id: &str) -> budgetly_core::Result<core_categories::NewCategory> {
        Ok(core_categories::NewCategory {
            user_id: user_id.to_string(),
            name: present(self.name, "name")?,
            color: present(self.color, "color")?,
            limit: self.limit.ok_or_else(|| missing("limit"))?,
            month: present(self.month, "month")?,
        })
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub limit: Option<Decimal>,
}

impl TryFrom<CategoryUpdate> for core_categories::CategoryUpdate {
    type Error = budgetly_core::Error;

    fn try_from(update: CategoryUpdate) -> Result<Self, Self::Error> {
        Ok(Self {
            name: present(update.name, "name")?,
            color: present(update.color, "color")?,
            limit: update.limit.ok_or_else(|| missing("limit"))?,
        })
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub color: String,
    #[schema(value_type = f64)]
    pub limit: Decimal,
    #[schema(value_type = f64)]
    pub spent: Decimal,
    #[schema(value_type = f64)]
    pub remaining: Decimal,
    pub over_budget: bool,
}

impl From<core_summary::CategorySummary> for CategorySummary {
    fn from(s: core_summary::CategorySummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            color: s.color,
            limit: s.limit,
            spent: s.spent,
            remaining: s.remaining,
            over_budget: s.over_budget,
        }
    }
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl From<core_expenses::Expense> for Expense {
    fn from(e: core_expenses::Expense) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            category_id: e.category_id,
            amount: e.amount,
            date: e.date,
            created_at: e.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub category_id: Option<String>,
    /// `YYYY-MM-DD`, a naive datetime, or RFC 3339. Defaults to now.
    pub date: Option<String>,
}

impl TryFrom<NewExpense> for core_expenses::ExpenseInput {
    type Error = budgetly_core::Error;

    fn try_from(body: NewExpense) -> Result<Self, Self::Error> {
        let date = body
            .date
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_expense_date(&d))
            .transpose()?;
        Ok(Self {
            category_id: present(body.category_id, "categoryId")?,
            amount: body.amount.ok_or_else(|| missing("amount"))?,
            date,
        })
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreated {
    /// `over` or `within`.
    pub status: String,
    pub expense: Expense,
}

impl From<core_expenses::ExpenseCreated> for ExpenseCreated {
    fn from(created: core_expenses::ExpenseCreated) -> Self {
        let status = match created.status {
            core_expenses::BudgetStatus::Over => "over",
            core_expenses::BudgetStatus::Within => "within",
        }
        .to_string();
        Self {
            status,
            expense: created.expense.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users & auth
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for User {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}
