use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use budgetly_core::categories as core_categories;
use budgetly_core::MonthKey;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{Category, CategorySummary, CategoryUpdate, MessageResponse, MonthQuery, NewCategory},
};

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(("month" = Option<String>, Query, description = "Restrict to one month, YYYY-MM")),
    responses((status = 200, body = [Category]))
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Category>>> {
    let Query(query) = query?;
    let categories = state
        .category_service
        .list_categories(&user.id, query.month.as_deref())?;
    Ok(Json(categories.into_iter().map(Category::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = NewCategory,
    responses((status = 200, body = Category), (status = 400, description = "Missing or invalid field"))
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(body) = body?;
    let created = state
        .category_service
        .create_category(body.into_core(&user.id)?)
        .await?;
    Ok(Json(created.into()))
}

/// Spend vs limit for every category of the month. Defaults to the current month.
#[utoipa::path(
    get,
    path = "/api/v1/categories/summary",
    params(("month" = Option<String>, Query, description = "YYYY-MM, defaults to the current month")),
    responses((status = 200, body = [CategorySummary]))
)]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CategorySummary>>> {
    let Query(query) = query?;
    let month = query
        .month
        .unwrap_or_else(|| MonthKey::current().to_string());
    let summary = state.summary_service.get_monthly_summary(&user.id, &month)?;
    Ok(Json(summary.into_iter().map(CategorySummary::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses((status = 200, body = Category), (status = 404, description = "Category not found"))
)]
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.get_category(&user.id, &id)?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = CategoryUpdate,
    responses((status = 200, body = Category), (status = 404, description = "Category not found"))
)]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<CategoryUpdate>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Json(body) = body?;
    let update = core_categories::CategoryUpdate::try_from(body)?;
    let updated = state
        .category_service
        .update_category(&user.id, &id, update)
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses((status = 200, body = MessageResponse), (status = 404, description = "Category not found"))
)]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.category_service.delete_category(&user.id, &id).await?;
    Ok(Json(MessageResponse {
        message: "Category deleted".to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/summary", get(get_summary))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
