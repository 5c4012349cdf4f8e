use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budgets;
mod categories;
mod overview;
mod server;
mod transactions;
mod user;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidName(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidCursor(_)
        | EngineError::KindMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

pub(crate) fn map_kind(kind: engine::EntryKind) -> api_types::EntryKind {
    match kind {
        engine::EntryKind::Expense => api_types::EntryKind::Expense,
        engine::EntryKind::Income => api_types::EntryKind::Income,
    }
}

pub(crate) fn engine_kind(kind: api_types::EntryKind) -> engine::EntryKind {
    match kind {
        api_types::EntryKind::Expense => engine::EntryKind::Expense,
        api_types::EntryKind::Income => engine::EntryKind::Income,
    }
}
