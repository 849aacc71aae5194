use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations.
///
/// Every lookup is scoped by owner: a category that exists but belongs to
/// someone else is indistinguishable from a missing one.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Categories of one owner, optionally restricted to a month, oldest first.
    fn list_categories(&self, user_id: &str, month: Option<&str>) -> Result<Vec<Category>>;
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;
    async fn insert_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Option<Category>>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn list_categories(&self, user_id: &str, month: Option<&str>) -> Result<Vec<Category>>;
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
