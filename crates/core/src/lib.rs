//! Budgetly Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for Budgetly: monthly spending
//! categories, expenses, and the spend-vs-limit aggregation.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod categories;
pub mod constants;
pub mod errors;
pub mod expenses;
pub mod summary;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export common month helpers
pub use utils::month::{MonthKey, MonthRange};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
