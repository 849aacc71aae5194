//! SQLite storage implementation for Budgetly.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `budgetly-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for users, categories and expenses
//!
//! This is the only crate in the workspace that depends on Diesel.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod categories;
pub mod expenses;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from budgetly-core for convenience
pub use budgetly_core::errors::{DatabaseError, Error, Result};
