use axum::{
    Router,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, patch, post},
};
use sqlx::SqlitePool;

use crate::error::AppError;

mod health;
mod shopping_list;

#[derive(Clone)]
pub struct AppState {
    pub shopping_command: homeplan_shopping::Command,
    pub shopping_query: homeplan_shopping::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(state: homeplan_shared::State) -> Self {
        Self {
            shopping_command: homeplan_shopping::Command::new(state.clone()),
            shopping_query: homeplan_shopping::Query(state.clone()),
            pool: state.read_db,
        }
    }
}

/// Tenant of the request, taken from the `x-tenant-id` header set by the
/// gateway in front of the service.
#[derive(Debug, Clone)]
pub struct Tenant(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-tenant-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Tenant(value.to_owned()))
            .ok_or(AppError::MissingTenant)
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route(
            "/api/meal-plans/{id}/shopping-list",
            post(shopping_list::generate),
        )
        .route(
            "/api/shopping-lists/{id}",
            get(shopping_list::find).delete(shopping_list::delete),
        )
        .route(
            "/api/shopping-lists/{id}/complete",
            post(shopping_list::complete),
        )
        .route(
            "/api/shopping-lists/{id}/items/{item_id}",
            patch(shopping_list::update_item),
        )
        .route(
            "/api/shopping-lists/{id}/items/{item_id}/toggle",
            post(shopping_list::toggle),
        )
        .route(
            "/api/households/{id}/shopping-list",
            get(shopping_list::find_active),
        )
        .with_state(app_state)
}
