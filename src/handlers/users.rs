// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        menu::RouteNode,
        pagination::{PageRequest, PageResponse},
        user::{BindRolesPayload, CreateUserPayload, UpdateUserPayload, User, UserDetail},
    },
};

// POST /api/users
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state.user_service.create_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /api/users/{id}
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let user = app_state.user_service.update_user(id, &payload).await?;
    Ok(Json(user))
}

// GET /api/users/detail/{id}
pub async fn get_user_detail(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserDetail>, AppError> {
    let detail = app_state.user_service.get_user_detail(id).await?;
    Ok(Json(detail))
}

// POST /api/users/{id}/roles (substitui todos os cargos)
pub async fn bind_roles(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BindRolesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state
        .association_service
        .replace_user_roles(id, &payload.roles)
        .await?;

    Ok(Json(json!({ "ok": true, "roles": roles })))
}

// GET /api/users/routes (rotas do usuário do token)
pub async fn get_routes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<RouteNode>>, AppError> {
    let routes = app_state.user_service.user_routes(user.id).await?;
    Ok(Json(routes))
}

// POST /api/users/page
pub async fn page_users(
    State(app_state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse<User>>, AppError> {
    request.validate()?;

    let page = app_state.user_service.page_users(request).await?;
    Ok(Json(page))
}

// GET /api/users/me
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
