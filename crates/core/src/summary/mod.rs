//! Monthly spend-vs-limit aggregation.

mod summary_model;
mod summary_service;

pub use summary_model::CategorySummary;
pub use summary_service::{summarize, SummaryService, SummaryServiceTrait};
