use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spend status of one category for its month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub color: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}
