use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, require_auth},
    config::Config,
    main_lib::AppState,
    models::{
        AuthResponse, Category, CategorySummary, CategoryUpdate, Expense, ExpenseCreated,
        LoginRequest, MessageResponse, NewCategory, NewExpense, SignupRequest, User,
    },
};

pub mod categories;
pub mod expenses;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "OK")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        auth::signup,
        auth::login,
        auth::me,
        categories::list_categories,
        categories::create_category,
        categories::get_summary,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        expenses::create_expense,
        expenses::list_expenses,
        expenses::list_recent_expenses,
        expenses::delete_expense,
    ),
    components(schemas(
        Category,
        NewCategory,
        CategoryUpdate,
        CategorySummary,
        Expense,
        NewExpense,
        ExpenseCreated,
        User,
        SignupRequest,
        LoginRequest,
        AuthResponse,
        MessageResponse,
    )),
    tags((name = "budgetly"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .merge(categories::router())
        .merge(expenses::router())
        .route("/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
