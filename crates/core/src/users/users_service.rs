use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::users::users_model::{normalize_email, NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

/// Checks a plaintext password before it is hashed.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }
    Ok(())
}

fn email_taken() -> Error {
    Error::ConstraintViolation("Email is already registered".to_string())
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let new_user = new_user.normalized()?;
        if self.repository.find_user_by_email(&new_user.email)?.is_some() {
            return Err(email_taken());
        }

        match self.repository.insert_user(new_user).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(user)
            }
            // lost a race with a concurrent signup for the same email
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => Err(email_taken()),
            Err(e) => Err(e),
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email)?;
        self.repository.find_user_by_email(&email)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_user(user_id)?
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryBudgetStore;

    fn ana(email: &str) -> NewUser {
        NewUser {
            name: " Ana ".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn register_normalizes_and_finds_by_email() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let svc = UserService::new(store.clone());

        let user = svc.register(ana("Ana@Example.com")).await.unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");

        let found = svc.find_by_email(" ANA@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(svc.get_user(&user.id).unwrap().email, "ana@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let svc = UserService::new(store.clone());
        svc.register(ana("ana@example.com")).await.unwrap();

        let err = svc.register(ana("ANA@example.com")).await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert_eq!(store.users.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_requires_name() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let mut nameless = ana("ana@example.com");
        nameless.name = "   ".to_string();
        let err = UserService::new(store).register(nameless).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let store = Arc::new(InMemoryBudgetStore::default());
        let err = UserService::new(store).get_user("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }
}
