use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Expects an already-normalized email.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
}
