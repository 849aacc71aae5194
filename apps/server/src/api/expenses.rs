use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use budgetly_core::expenses::ExpenseInput;
use budgetly_core::MonthKey;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{Expense, ExpenseCreated, MonthQuery, NewExpense, RecentQuery},
};

/// Logs an expense and reports whether its category went over budget.
/// The expense is stored either way.
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = NewExpense,
    responses(
        (status = 200, body = ExpenseCreated),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<NewExpense>, JsonRejection>,
) -> ApiResult<Json<ExpenseCreated>> {
    let Json(body) = body?;
    let input = ExpenseInput::try_from(body)?;
    let created = state.expense_service.add_expense(&user.id, input).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    params(("month" = Option<String>, Query, description = "YYYY-MM, defaults to the current month")),
    responses((status = 200, body = [Expense]))
)]
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Expense>>> {
    let Query(query) = query?;
    let month = query
        .month
        .unwrap_or_else(|| MonthKey::current().to_string());
    let expenses = state.expense_service.list_month_expenses(&user.id, &month)?;
    Ok(Json(expenses.into_iter().map(Expense::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/expenses/recent",
    params(("limit" = Option<i64>, Query, description = "1-100, defaults to 10")),
    responses((status = 200, body = [Expense]))
)]
pub async fn list_recent_expenses(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Expense>>> {
    let Query(query) = query?;
    let expenses = state
        .expense_service
        .list_recent_expenses(&user.id, query.limit)?;
    Ok(Json(expenses.into_iter().map(Expense::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{id}",
    params(("id" = String, Path, description = "Expense id")),
    responses((status = 204, description = "Expense deleted"), (status = 404, description = "Expense not found"))
)]
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.expense_service.delete_expense(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/recent", get(list_recent_expenses))
        .route("/expenses/{id}", delete(delete_expense))
}
