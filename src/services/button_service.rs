// src/services/button_service.rs

use crate::common::error::AppError;
use crate::db::{rbac_repo::PermissionRecord, ButtonRepository};
use crate::models::button::{Button, ButtonPayload};
use crate::models::pagination::{PageRequest, PageResponse};
use crate::models::permission::{BindEntityPermissionPayload, Permission, PermissionType};
use crate::services::rbac_service::RbacService;

#[derive(Clone)]
pub struct ButtonService {
    repo: ButtonRepository,
    rbac_service: RbacService,
}

impl ButtonService {
    pub fn new(repo: ButtonRepository, rbac_service: RbacService) -> Self {
        Self { repo, rbac_service }
    }

    pub async fn create_button(&self, payload: &ButtonPayload) -> Result<Button, AppError> {
        let button = self.repo.create_button(payload).await?;
        tracing::info!(button_id = button.id, menu_id = button.menu_id, "Botão criado");
        Ok(button)
    }

    pub async fn update_button(&self, id: i32, payload: &ButtonPayload) -> Result<Button, AppError> {
        self.repo
            .update_button(id, payload)
            .await?
            .ok_or_else(|| button_not_found(id))
    }

    pub async fn get_button(&self, id: i32) -> Result<Button, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| button_not_found(id))
    }

    pub async fn page_buttons(&self, request: PageRequest) -> Result<PageResponse<Button>, AppError> {
        let (buttons, total) = self.repo.page_buttons(request.offset(), request.limit()).await?;
        Ok(PageResponse::new(buttons, total, request))
    }

    pub async fn buttons_by_menu(&self, menu_id: i32) -> Result<Vec<Button>, AppError> {
        self.repo.list_by_menu(menu_id).await
    }

    /// Cria uma permissão do tipo botão ligada a este botão.
    pub async fn bind_button_permission(
        &self,
        button_id: i32,
        payload: &BindEntityPermissionPayload,
    ) -> Result<Permission, AppError> {
        self.get_button(button_id).await?;

        self.rbac_service
            .create_linked_permission(PermissionRecord {
                code: &payload.permission_code,
                name: &payload.name,
                permission_type: PermissionType::Button,
                menu_id: None,
                button_id: Some(button_id),
                parent_id: payload.parent_id,
            })
            .await
    }

    pub async fn button_permissions(&self, button_id: i32) -> Result<Vec<Permission>, AppError> {
        self.get_button(button_id).await?;
        self.rbac_service.permissions_by_button(button_id).await
    }
}

fn button_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Botão {} não encontrado.", id))
}
