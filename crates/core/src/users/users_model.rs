use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Trims the name and canonicalizes the email to lowercase.
    pub fn normalized(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let email = normalize_email(&self.email)?;
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password".to_string()).into());
        }
        Ok(NewUser {
            name,
            email,
            password_hash: self.password_hash,
        })
    }
}

pub(crate) fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email".to_string()).into());
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::InvalidInput(format!("Invalid email '{}'", raw.trim())).into()),
    }
}
