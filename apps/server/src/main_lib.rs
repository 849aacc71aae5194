use std::sync::Arc;

use crate::{
    auth::{AuthConfig, AuthManager},
    config::Config,
};
use budgetly_core::{
    categories::{CategoryService, CategoryServiceTrait},
    expenses::{ExpenseService, ExpenseServiceTrait},
    summary::{SummaryService, SummaryServiceTrait},
    users::{UserService, UserServiceTrait},
};
use budgetly_storage_sqlite::{
    categories::CategoryRepository,
    db::{self, write_actor},
    expenses::ExpenseRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub summary_service: Arc<dyn SummaryServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let expense_repository = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer));

    let category_service = Arc::new(CategoryService::new(category_repository.clone()));
    let expense_service = Arc::new(ExpenseService::new(
        category_repository.clone(),
        expense_repository.clone(),
    ));
    let summary_service = Arc::new(SummaryService::new(
        category_repository,
        expense_repository,
    ));
    let user_service = Arc::new(UserService::new(user_repository));

    let auth = Arc::new(AuthManager::new(&AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        access_token_ttl: config.token_ttl,
    }));

    Ok(Arc::new(AppState {
        category_service,
        expense_service,
        summary_service,
        user_service,
        auth,
    }))
}
