//! Categories API endpoints.

use api_types::category::{CategoryCreate, CategoryListResponse, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, engine_kind, map_kind, server::ServerState, user};

pub(crate) fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        kind: map_kind(category.kind),
        color: category.color,
        icon: category.icon,
        created_at: category.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .list_categories(&user.username)
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(
            &user.username,
            &payload.name,
            engine_kind(payload.kind),
            &payload.color,
            &payload.icon,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

/// Deleting a category also deletes every transaction and budget that
/// references it; clients are expected to confirm with the user first.
pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_category(&user.username, category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
