pub mod error;
pub mod stats;
pub mod todos;
pub mod users;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde_json::json;
use tracing::error;

use medbridge_auth::PasswordManager;
use medbridge_store::{Store, StoreError};

pub use error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn Store>,
    pub passwords: PasswordManager,
}

/// Builds the full application router. The binary and the HTTP tests both go
/// through here so they serve the identical surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/todos/{id}",
            get(todos::get_todo)
                .put(todos::replace_todo)
                .patch(todos::patch_todo)
                .delete(todos::delete_todo),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/stats", get(stats::get_stats))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "medbridge to-do API is running" }))
}

/// Store operations are blocking (SQLite behind a mutex), so handlers hop
/// through spawn_blocking instead of stalling the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?
        .map_err(ApiError::from)
}
