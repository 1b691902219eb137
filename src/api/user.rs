//! Current-user endpoint

use axum::response::Json;

use crate::auth::{MaybeUser, Session};

/// GET /usuario
///
/// Returns the principal attached by the gate. Serializes to `null`
/// when the gate runs in its open fallback and no session is present.
pub async fn current_user(MaybeUser(session): MaybeUser) -> Json<Option<Session>> {
    Json(session)
}
