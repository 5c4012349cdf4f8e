//! Budgets API endpoints.

use api_types::budget::{BudgetCreate, BudgetListResponse, BudgetView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category_id: budget.category_id,
        amount_minor: budget.amount_minor,
        month: budget.month,
        created_at: budget.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let budgets = state
        .engine
        .list_budgets(&user.username)
        .await?
        .into_iter()
        .map(map_budget)
        .collect();

    Ok(Json(BudgetListResponse { budgets }))
}

/// A duplicate `(category, month)` budget comes back as 409 so clients can
/// show an "already exists" message instead of a generic failure.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetCreate>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .create_budget(
            &user.username,
            payload.category_id,
            payload.amount_minor,
            payload.month,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_budget(budget))))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(budget_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_budget(&user.username, budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
