// src/handlers/buttons.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        button::{Button, ButtonPayload},
        pagination::{PageRequest, PageResponse},
        permission::{BindEntityPermissionPayload, Permission},
    },
};

// POST /api/buttons
pub async fn create_button(
    State(app_state): State<AppState>,
    Json(payload): Json<ButtonPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let button = app_state.button_service.create_button(&payload).await?;
    Ok((StatusCode::CREATED, Json(button)))
}

// PUT /api/buttons/{id}
pub async fn update_button(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ButtonPayload>,
) -> Result<Json<Button>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.button_service.update_button(id, &payload).await?))
}

// GET /api/buttons/detail/{id}
pub async fn get_button(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Button>, AppError> {
    Ok(Json(app_state.button_service.get_button(id).await?))
}

// GET /api/buttons/menu/{menuId}
pub async fn list_buttons_by_menu(
    State(app_state): State<AppState>,
    Path(menu_id): Path<i32>,
) -> Result<Json<Vec<Button>>, AppError> {
    Ok(Json(app_state.button_service.buttons_by_menu(menu_id).await?))
}

// POST /api/buttons/{id}/permission
pub async fn bind_button_permission(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BindEntityPermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let permission = app_state.button_service.bind_button_permission(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

// GET /api/buttons/{id}/permissions
pub async fn get_button_permissions(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Permission>>, AppError> {
    Ok(Json(app_state.button_service.button_permissions(id).await?))
}

// POST /api/buttons/page
pub async fn page_buttons(
    State(app_state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse<Button>>, AppError> {
    request.validate()?;
    Ok(Json(app_state.button_service.page_buttons(request).await?))
}
