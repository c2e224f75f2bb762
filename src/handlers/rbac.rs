// src/handlers/rbac.rs

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
    models::{
        pagination::{PageRequest, PageResponse},
        permission::{Permission, PermissionNode, PermissionPayload, PermissionType},
        role::{BindPermissionsPayload, Role, RolePayload},
    },
};

// ---
// Cargos
// ---

// POST /api/roles
pub async fn create_role(
    State(app_state): State<AppState>,
    Json(payload): Json<RolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let role = app_state.rbac_service.create_role(&payload).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

// PUT /api/roles/{id}
pub async fn update_role(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<RolePayload>,
) -> Result<Json<Role>, AppError> {
    payload.validate()?;

    let role = app_state.rbac_service.update_role(id, &payload).await?;
    Ok(Json(role))
}

// GET /api/roles/detail/{id}
pub async fn get_role(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Role>, AppError> {
    Ok(Json(app_state.rbac_service.get_role(id).await?))
}

// POST /api/roles/page
pub async fn page_roles(
    State(app_state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse<Role>>, AppError> {
    request.validate()?;
    Ok(Json(app_state.rbac_service.page_roles(request).await?))
}

// POST /api/roles/{id}/bindPermissions (substitui todas as permissões)
pub async fn bind_permissions(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BindPermissionsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = app_state
        .association_service
        .replace_role_permissions(id, &payload.permissions)
        .await?;

    Ok(Json(json!({ "ok": true, "permissions": permissions })))
}

// GET /api/roles/{id}/permissions (árvore com `enable`)
pub async fn get_role_permissions(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<PermissionNode>>, AppError> {
    Ok(Json(app_state.rbac_service.role_permission_tree(id).await?))
}

// ---
// Permissões
// ---

// POST /api/permissions
pub async fn create_permission(
    State(app_state): State<AppState>,
    Json(payload): Json<PermissionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let permission = app_state.rbac_service.create_permission(&payload).await?;
    Ok((StatusCode::CREATED, Json(permission)))
}

// PUT /api/permissions/{id}
pub async fn update_permission(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PermissionPayload>,
) -> Result<Json<Permission>, AppError> {
    payload.validate()?;

    let permission = app_state.rbac_service.update_permission(id, &payload).await?;
    Ok(Json(permission))
}

// GET /api/permissions/detail/{id}
pub async fn get_permission(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Permission>, AppError> {
    Ok(Json(app_state.rbac_service.get_permission(id).await?))
}

// POST /api/permissions/page
pub async fn page_permissions(
    State(app_state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PageResponse<Permission>>, AppError> {
    request.validate()?;
    Ok(Json(app_state.rbac_service.page_permissions(request).await?))
}

// GET /api/permissions/type/{type}
pub async fn list_permissions_by_type(
    State(app_state): State<AppState>,
    Path(raw_type): Path<String>,
) -> Result<Json<Vec<Permission>>, AppError> {
    let permission_type: PermissionType = raw_type.parse().map_err(AppError::InvalidInput)?;
    Ok(Json(app_state.rbac_service.permissions_by_type(permission_type).await?))
}
