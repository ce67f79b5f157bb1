use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use medbridge_store::NewUser;
use medbridge_types::api::{CreateUserRequest, UserView};

use crate::{ApiError, AppState, run_blocking};

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    // Hash before touching the store; the plaintext never goes further.
    let credential = state
        .passwords
        .hash(&req.password)
        .map_err(ApiError::Internal)?;

    let new = NewUser {
        name: req.name,
        email: req.email,
        credential,
    };
    let store = state.store.clone();
    let user = run_blocking(move || store.create_user(new)).await?;
    Ok((StatusCode::CREATED, Json(UserView::from(user))))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let store = state.store.clone();
    let users = run_blocking(move || store.list_users()).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}
