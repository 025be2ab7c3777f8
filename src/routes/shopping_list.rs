use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use homeplan_shopping::{ShoppingList, UpdateItemInput};

use super::{AppState, Tenant};
use crate::error::AppError;

type ApiResult<T> = Result<T, AppError>;

/// POST /api/meal-plans/{id}/shopping-list
pub async fn generate(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(meal_plan_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let list = state
        .shopping_command
        .generate(&meal_plan_id, &tenant)
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/shopping-lists/{id}
pub async fn find(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<String>,
) -> ApiResult<Json<ShoppingList>> {
    match state.shopping_query.find(&id, tenant).await? {
        Some(list) => Ok(Json(list)),
        None => Err(AppError::NotFound(format!("shopping list {id}"))),
    }
}

/// GET /api/households/{id}/shopping-list
pub async fn find_active(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(household_id): Path<String>,
) -> ApiResult<Json<ShoppingList>> {
    match state
        .shopping_query
        .find_active(&household_id, tenant)
        .await?
    {
        Some(list) => Ok(Json(list)),
        None => Err(AppError::NotFound(format!(
            "active shopping list of household {household_id}"
        ))),
    }
}

/// PATCH /api/shopping-lists/{id}/items/{item_id}
pub async fn update_item(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path((id, item_id)): Path<(String, String)>,
    Json(input): Json<UpdateItemInput>,
) -> ApiResult<Json<ShoppingList>> {
    let list = state
        .shopping_command
        .update_item(&id, &item_id, input, &tenant)
        .await?;

    Ok(Json(list))
}

/// POST /api/shopping-lists/{id}/items/{item_id}/toggle
pub async fn toggle(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path((id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<ShoppingList>> {
    let list = state
        .shopping_command
        .toggle_purchased(&id, &item_id, &tenant)
        .await?;

    Ok(Json(list))
}

/// POST /api/shopping-lists/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<String>,
) -> ApiResult<Json<ShoppingList>> {
    let list = state.shopping_command.complete(&id, &tenant).await?;

    Ok(Json(list))
}

/// DELETE /api/shopping-lists/{id}
pub async fn delete(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.shopping_command.delete(&id, &tenant).await?;

    Ok(StatusCode::NO_CONTENT)
}
