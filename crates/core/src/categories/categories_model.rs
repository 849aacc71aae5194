//! Category domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::money::validate_money;
use crate::utils::month::MonthKey;

/// Domain model representing a monthly spending category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub limit: Decimal,
    pub month: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    pub fn month_key(&self) -> Result<MonthKey> {
        MonthKey::parse(&self.month)
    }
}

/// Input model for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub limit: Decimal,
    pub month: String,
}

impl NewCategory {
    /// Validates fields and canonicalizes name, color and month.
    pub fn normalized(self) -> Result<Self> {
        let (name, color) = normalize_label_fields(&self.name, &self.color)?;
        validate_limit(self.limit)?;
        let month = MonthKey::parse(&self.month)?.to_string();
        Ok(Self {
            user_id: self.user_id,
            name,
            color,
            limit: self.limit,
            month,
        })
    }
}

/// Fields a category owner may change. Month and owner are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: String,
    pub color: String,
    pub limit: Decimal,
}

impl CategoryUpdate {
    pub fn normalized(self) -> Result<Self> {
        let (name, color) = normalize_label_fields(&self.name, &self.color)?;
        validate_limit(self.limit)?;
        Ok(Self {
            name,
            color,
            limit: self.limit,
        })
    }
}

fn normalize_label_fields(name: &str, color: &str) -> Result<(String, String)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    let color = color.trim();
    if color.is_empty() {
        return Err(ValidationError::MissingField("color".to_string()).into());
    }
    Ok((name.to_string(), color.to_string()))
}

fn validate_limit(limit: Decimal) -> Result<()> {
    validate_money("limit", limit)
}
