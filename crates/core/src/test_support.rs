//! In-memory repositories shared by service tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::categories::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use crate::errors::{DatabaseError, Result};
use crate::expenses::{Expense, ExpenseRepositoryTrait, NewExpense, TrackedExpense};
use crate::users::{NewUser, User, UserRepositoryTrait};
use crate::utils::money::{checked_add, checked_sum};
use crate::utils::month::MonthRange;
use crate::utils::time_utils::now_utc;

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn category_fixture(id: &str, limit: Decimal) -> Category {
    Category {
        id: id.to_string(),
        user_id: "alice".to_string(),
        name: format!("Category {id}"),
        color: "#000000".to_string(),
        limit,
        month: "2025-06".to_string(),
        created_at: at(2025, 6, 1),
        updated_at: at(2025, 6, 1),
    }
}

#[derive(Default)]
pub struct InMemoryBudgetStore {
    pub categories: RwLock<Vec<Category>>,
    pub expenses: RwLock<Vec<Expense>>,
    pub users: RwLock<Vec<User>>,
}

impl InMemoryBudgetStore {
    pub fn push_expense(&self, user_id: &str, category_id: &str, amount: Decimal, date: NaiveDateTime) {
        self.expenses.write().unwrap().push(Expense {
            id: Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            category_id: category_id.to_string(),
            amount,
            date,
            created_at: now_utc(),
        });
    }
}

fn newest_first(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryBudgetStore {
    fn list_categories(&self, user_id: &str, month: Option<&str>) -> Result<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| month.map_or(true, |m| c.month == m))
            .cloned()
            .collect())
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id && c.user_id == user_id)
            .cloned())
    }

    async fn insert_category(&self, new_category: NewCategory) -> Result<Category> {
        let now = now_utc();
        let category = Category {
            id: Uuid::now_v7().to_string(),
            user_id: new_category.user_id,
            name: new_category.name,
            color: new_category.color,
            limit: new_category.limit,
            month: new_category.month,
            created_at: now,
            updated_at: now,
        };
        self.categories.write().unwrap().push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>> {
        let mut categories = self.categories.write().unwrap();
        let Some(category) = categories
            .iter_mut()
            .find(|c| c.id == category_id && c.user_id == user_id)
        else {
            return Ok(None);
        };
        category.name = update.name;
        category.color = update.color;
        category.limit = update.limit;
        category.updated_at = now_utc();
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        let mut categories = self.categories.write().unwrap();
        let before = categories.len();
        categories.retain(|c| !(c.id == category_id && c.user_id == user_id));
        let deleted = before - categories.len();
        if deleted > 0 {
            self.expenses
                .write()
                .unwrap()
                .retain(|e| e.category_id != category_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryBudgetStore {
    fn list_expenses_in_range(&self, user_id: &str, range: &MonthRange) -> Result<Vec<Expense>> {
        let matching = self
            .expenses
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && range.contains(&e.date))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    fn list_recent_expenses(&self, user_id: &str, limit: i64) -> Result<Vec<Expense>> {
        let owned = self
            .expenses
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(owned)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    fn sum_spend_by_category(
        &self,
        user_id: &str,
        range: &MonthRange,
    ) -> Result<HashMap<String, Decimal>> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for expense in self.expenses.read().unwrap().iter() {
            if expense.user_id == user_id && range.contains(&expense.date) {
                let total = totals.entry(expense.category_id.clone()).or_default();
                *total = checked_add(*total, expense.amount)?;
            }
        }
        Ok(totals)
    }

    async fn insert_tracked_expense(
        &self,
        new_expense: NewExpense,
        window: MonthRange,
    ) -> Result<TrackedExpense> {
        let mut expenses = self.expenses.write().unwrap();
        let spent_before = checked_sum(
            expenses
                .iter()
                .filter(|e| e.category_id == new_expense.category_id && window.contains(&e.date))
                .map(|e| e.amount),
        )?;
        let expense = Expense {
            id: Uuid::now_v7().to_string(),
            user_id: new_expense.user_id,
            category_id: new_expense.category_id,
            amount: new_expense.amount,
            date: new_expense.date,
            created_at: now_utc(),
        };
        expenses.push(expense.clone());
        Ok(TrackedExpense {
            expense,
            spent_before,
        })
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<usize> {
        let mut expenses = self.expenses.write().unwrap();
        let before = expenses.len();
        expenses.retain(|e| !(e.id == expense_id && e.user_id == user_id));
        Ok(before - expenses.len())
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryBudgetStore {
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation("users.email".to_string()).into());
        }
        let user = User {
            id: Uuid::now_v7().to_string(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
