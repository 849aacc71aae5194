use crate::categories::CategoryRepositoryTrait;
use crate::constants::{DEFAULT_RECENT_EXPENSES, MAX_RECENT_EXPENSES};
use crate::errors::{Error, Result, ValidationError};
use crate::expenses::expenses_model::{
    BudgetStatus, Expense, ExpenseCreated, ExpenseInput, NewExpense,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::utils::money::{checked_add, validate_money};
use crate::utils::month::MonthKey;
use crate::utils::time_utils::now_utc;
use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

pub struct ExpenseService {
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            category_repository,
            expense_repository,
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    /// Logs an expense and reports whether its category is now over budget.
    ///
    /// The spend window is the category's own month, whatever the expense date.
    /// The check never rejects the expense.
    async fn add_expense(&self, user_id: &str, input: ExpenseInput) -> Result<ExpenseCreated> {
        if input.category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("categoryId".to_string()).into());
        }
        validate_money("amount", input.amount)?;

        let category = self
            .category_repository
            .get_category(user_id, &input.category_id)?
            .ok_or_else(|| Error::NotFound("Category".to_string()))?;
        let window = category.month_key()?.range();

        let new_expense = NewExpense {
            user_id: user_id.to_string(),
            category_id: category.id.clone(),
            amount: input.amount,
            date: input.date.unwrap_or_else(now_utc),
        };

        let tracked = self
            .expense_repository
            .insert_tracked_expense(new_expense, window)
            .await?;

        let spent = checked_add(tracked.spent_before, tracked.expense.amount)?;
        let status = BudgetStatus::evaluate(spent, category.limit);
        if status == BudgetStatus::Over {
            info!(
                "Category {} is over budget for {}: spent {} of {}",
                category.id, category.month, spent, category.limit
            );
        }

        Ok(ExpenseCreated {
            status,
            expense: tracked.expense,
        })
    }

    fn list_month_expenses(&self, user_id: &str, month: &str) -> Result<Vec<Expense>> {
        let range = MonthKey::parse(month)?.range();
        self.expense_repository.list_expenses_in_range(user_id, &range)
    }

    fn list_recent_expenses(&self, user_id: &str, limit: Option<i64>) -> Result<Vec<Expense>> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_EXPENSES)
            .clamp(1, MAX_RECENT_EXPENSES);
        self.expense_repository.list_recent_expenses(user_id, limit)
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<()> {
        let deleted = self
            .expense_repository
            .delete_expense(user_id, expense_id)
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound("Expense".to_string()));
        }
        debug!("Deleted expense {}", expense_id);
        Ok(())
    }
}
