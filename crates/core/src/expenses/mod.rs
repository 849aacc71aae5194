//! Expenses module - spend records and the advisory budget check.

mod expenses_model;
mod expenses_service;
mod expenses_traits;

pub use expenses_model::{
    BudgetStatus, Expense, ExpenseCreated, ExpenseInput, NewExpense, TrackedExpense,
};
pub use expenses_service::ExpenseService;
pub use expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
