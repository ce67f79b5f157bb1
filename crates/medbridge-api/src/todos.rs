use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use medbridge_store::{NewTodo, TodoPatch};
use medbridge_types::api::{CreateTodoRequest, PatchTodoRequest, ReplaceTodoRequest, TodoView};

use crate::{ApiError, AppState, run_blocking};

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoView>>, ApiError> {
    let store = state.store.clone();
    let todos = run_blocking(move || store.list_todos()).await?;
    Ok(Json(todos.into_iter().map(TodoView::from).collect()))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoView>, ApiError> {
    let store = state.store.clone();
    let todo = run_blocking(move || store.get_todo(id)).await?;
    Ok(Json(todo.into()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    let new = NewTodo {
        task: req.task,
        done: req.done,
        owner_id: req.owner_id,
    };
    let store = state.store.clone();
    let todo = run_blocking(move || store.create_todo(new)).await?;
    Ok((StatusCode::CREATED, Json(TodoView::from(todo))))
}

pub async fn replace_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ReplaceTodoRequest>,
) -> Result<Json<TodoView>, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    let store = state.store.clone();
    let todo = run_blocking(move || store.replace_todo(id, req.task, req.done)).await?;
    Ok(Json(todo.into()))
}

pub async fn patch_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PatchTodoRequest>,
) -> Result<Json<TodoView>, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    let patch = TodoPatch {
        task: req.task,
        done: req.done,
    };
    let store = state.store.clone();
    let todo = run_blocking(move || store.update_todo(id, patch)).await?;
    Ok(Json(todo.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.clone();
    run_blocking(move || store.delete_todo(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
