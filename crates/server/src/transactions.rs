//! Transactions API endpoints.

use api_types::transaction::{
    TransactionCreate, TransactionListQuery, TransactionListResponse, TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, engine_kind, map_kind, server::ServerState, user};

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        category_id: tx.category_id,
        amount_minor: tx.amount_minor,
        description: tx.description,
        date: tx.date,
        kind: map_kind(tx.kind),
        created_at: tx.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let limit = query.limit.unwrap_or(engine::TRANSACTIONS_PAGE_MAX);
    let (transactions, next_cursor) = state
        .engine
        .list_transactions(&user.username, limit, query.cursor.as_deref())
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: transactions.into_iter().map(map_transaction).collect(),
        next_cursor,
    }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(
            &user.username,
            payload.category_id,
            payload.amount_minor,
            &payload.description,
            payload.date,
            engine_kind(payload.kind),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(&user.username, transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
