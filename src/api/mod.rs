//! API layer
//!
//! HTTP handlers for the task CRUD endpoints and the current-user
//! endpoint. Every route in this router sits behind the authorization
//! gate; the OAuth endpoints live in `crate::auth`.

mod tasks;
mod user;

use axum::{
    Router,
    middleware,
    routing::{get, patch, post},
};

use crate::AppState;
use crate::auth::require_auth;

/// Create the gated API router
///
/// The gate is applied as a single layer over the whole router, so no
/// handler here runs without passing it first.
pub fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/usuario", get(user::current_user))
        .route("/tarefas", get(tasks::list_tasks))
        .route("/tarefa", post(tasks::create_task))
        .route(
            "/tarefa/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tarefa/:id/completa", patch(tasks::mark_complete))
        .route("/tarefa/:id/incompleta", patch(tasks::mark_incomplete))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
