//! Task CRUD endpoints
//!
//! Each handler performs exactly one store call and maps its outcome
//! through a fixed table:
//!
//! | operation | validation | missing | backend |
//! |---|---|---|---|
//! | list/get  | -   | 404 | 500 |
//! | create    | 400 | 400 | 500 |
//! | update/delete/patch | 400 | 404 | 500 |
//!
//! Create never yields 404: it has no "not found" concept, so every
//! store-domain error becomes 400. Backend errors are logged and
//! replaced by a generic operation-specific message.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::AppState;
use crate::error::AppError;
use crate::store::{NewTask, StoreError, Task, TaskChanges};

/// Map store errors for read operations (list, get)
fn map_fetch_error(operation: &'static str, error: StoreError) -> AppError {
    tracing::error!(%error, operation, "task store call failed");
    match error {
        StoreError::Validation(message) | StoreError::Missing(message) => {
            AppError::NotFound(message)
        }
        StoreError::Database(_) => AppError::Internal(format!("erro ao {operation}")),
    }
}

/// Map store errors for create (no 404 path)
fn map_create_error(error: StoreError) -> AppError {
    tracing::error!(%error, operation = "criar tarefa", "task store call failed");
    match error {
        StoreError::Validation(message) | StoreError::Missing(message) => {
            AppError::Validation(message)
        }
        StoreError::Database(_) => AppError::Internal("erro ao criar tarefa".to_string()),
    }
}

/// Map store errors for update and delete
fn map_mutation_error(operation: &'static str, error: StoreError) -> AppError {
    tracing::error!(%error, operation, "task store call failed");
    match error {
        StoreError::Validation(message) => AppError::Validation(message),
        StoreError::Missing(message) => AppError::NotFound(message),
        StoreError::Database(_) => AppError::Internal(format!("erro ao {operation}")),
    }
}

/// GET /tarefas
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state
        .store
        .list()
        .await
        .map_err(|e| map_fetch_error("listar tarefas", e))?;

    Ok(Json(tasks))
}

/// GET /tarefa/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .store
        .get(id)
        .await
        .map_err(|e| map_fetch_error("buscar tarefa", e))?;

    Ok(Json(task))
}

/// POST /tarefa
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = state
        .store
        .create(payload)
        .await
        .map_err(map_create_error)?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /tarefa/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(changes): Json<TaskChanges>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .store
        .update(id, changes)
        .await
        .map_err(|e| map_mutation_error("atualizar tarefa", e))?;

    Ok(Json(task))
}

/// DELETE /tarefa/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .store
        .delete(id)
        .await
        .map_err(|e| map_mutation_error("remover tarefa", e))?;

    Ok(Json(task))
}

/// PATCH /tarefa/:id/completa
///
/// Not a separate store operation: reuses update with the fixed
/// partial payload `{completa: true}`.
pub async fn mark_complete(
    state: State<AppState>,
    id: Path<i64>,
) -> Result<Json<Task>, AppError> {
    set_complete(state, id, true).await
}

/// PATCH /tarefa/:id/incompleta
pub async fn mark_incomplete(
    state: State<AppState>,
    id: Path<i64>,
) -> Result<Json<Task>, AppError> {
    set_complete(state, id, false).await
}

async fn set_complete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    completa: bool,
) -> Result<Json<Task>, AppError> {
    let task = state
        .store
        .update(id, TaskChanges::set_complete(completa))
        .await
        .map_err(|e| map_mutation_error("atualizar tarefa", e))?;

    Ok(Json(task))
}
