// src/handlers/menus.rs

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
        menu::{Menu, MenuPayload},
        pagination::{PageRequest, PageResponse},
        permission::{BindEntityPermissionPayload, Permission},
    },
};

// POST /api/menus
pub async fn create_menu(
    State(app_state): State<AppState>,
    Json(payload): Json<MenuPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let menu = app_state.menu_service.create_menu(&payload).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

// PUT /api/menus/{id}
pub async fn update_menu(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MenuPayload>,
) -> Result<Json<Menu>, AppError> {
    payload.validate()?;
    Ok(Json(app_state.menu_service.update_menu(id, &payload).await?))
}

// GET /api/menus/detail/{id}
pub async fn get_menu(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Menu>, AppError> {
    Ok(Json(app_state.menu_service.get_menu(id).await?))
}

// POST /api/menus/page
pub async fn page_menus(
    State(app_state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse<Menu>>, AppError> {
    request.validate()?;
    Ok(Json(app_state.menu_service.page_menus(request).await?))
}

// GET /api/menus/parent/{parentId}
pub async fn list_menus_by_parent(
    State(app_state): State<AppState>,
    Path(parent_id): Path<i32>,
) -> Result<Json<Vec<Menu>>, AppError> {
    Ok(Json(app_state.menu_service.menus_by_parent(parent_id).await?))
}

// POST /api/menus/{id}/permission
pub async fn bind_menu_permission(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BindEntityPermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let permission = app_state.menu_service.bind_menu_permission(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

// GET /api/menus/{id}/permissions
pub async fn get_menu_permissions(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Permission>>, AppError> {
    Ok(Json(app_state.menu_service.menu_permissions(id).await?))
}
