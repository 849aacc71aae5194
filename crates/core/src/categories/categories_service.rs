use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::month::MonthKey;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

fn category_not_found() -> Error {
    Error::NotFound("Category".to_string())
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn list_categories(&self, user_id: &str, month: Option<&str>) -> Result<Vec<Category>> {
        let month = month.map(MonthKey::parse).transpose()?.map(|m| m.to_string());
        self.repository.list_categories(user_id, month.as_deref())
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.repository
            .get_category(user_id, category_id)?
            .ok_or_else(category_not_found)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        let new_category = new_category.normalized()?;
        debug!(
            "Creating category '{}' for month {}",
            new_category.name, new_category.month
        );
        self.repository.insert_category(new_category).await
    }

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        let update = update.normalized()?;
        self.repository
            .update_category(user_id, category_id, update)
            .await?
            .ok_or_else(category_not_found)
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        let deleted = self.repository.delete_category(user_id, category_id).await?;
        if deleted == 0 {
            return Err(category_not_found());
        }
        debug!("Deleted category {}", category_id);
        Ok(())
    }
}
