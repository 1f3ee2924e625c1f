//! User CRUD handlers: create, read, update, delete, list.

use crate::error::{AppError, ErrorBody};
use crate::model::{User, UserInput};
use crate::response::{self, MessageBody};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::invalid_field("user_id", "invalid_type", "user_id must be an integer"))
}

/// Unreadable bodies (bad JSON, wrong content type) are validation failures on `body`;
/// only an oversized body keeps its own status.
fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<UserInput, AppError> {
    let Json(value) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::invalid_field("body", "invalid_body", rejection.body_text())
        }
    })?;
    UserInput::from_body(value)
}

#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 413, description = "Body exceeds the size limit", body = ErrorBody),
        (status = 422, description = "Malformed or invalid body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input = parse_body(body)?;
    let user = UserService::create(&state.pool, &input).await?;
    Ok(response::created(user))
}

#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    responses(
        (status = 200, description = "All users in insertion order", body = [User]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = UserService::list(&state.pool).await?;
    Ok(response::ok(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 422, description = "Id is not an integer", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = UserService::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;
    Ok(response::ok(user))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input = parse_body(body)?;
    let user = UserService::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;
    Ok(response::ok(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 422, description = "Id is not an integer", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !UserService::delete(&state.pool, id).await? {
        return Err(AppError::user_not_found(id));
    }
    Ok(response::message("User deleted successfully"))
}
