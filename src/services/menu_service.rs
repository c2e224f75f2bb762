// src/services/menu_service.rs

use std::collections::HashMap;

use crate::common::error::AppError;
use crate::db::{rbac_repo::PermissionRecord, MenuRepository};
use crate::models::menu::{Menu, MenuPayload};
use crate::models::pagination::{PageRequest, PageResponse};
use crate::models::permission::{BindEntityPermissionPayload, Permission, PermissionType};
use crate::services::rbac_service::RbacService;
use crate::services::tree::{creates_cycle, parent_key, ROOT};

#[derive(Clone)]
pub struct MenuService {
    repo: MenuRepository,
    rbac_service: RbacService,
}

impl MenuService {
    pub fn new(repo: MenuRepository, rbac_service: RbacService) -> Self {
        Self { repo, rbac_service }
    }

    pub async fn create_menu(&self, payload: &MenuPayload) -> Result<Menu, AppError> {
        self.check_parent(None, payload.parent_id).await?;

        let menu = self.repo.create_menu(payload).await?;
        tracing::info!(menu_id = menu.id, name = %menu.name, "Menu criado");
        Ok(menu)
    }

    pub async fn update_menu(&self, id: i32, payload: &MenuPayload) -> Result<Menu, AppError> {
        self.check_parent(Some(id), payload.parent_id).await?;

        self.repo
            .update_menu(id, payload)
            .await?
            .ok_or_else(|| menu_not_found(id))
    }

    pub async fn get_menu(&self, id: i32) -> Result<Menu, AppError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| menu_not_found(id))
    }

    pub async fn page_menus(&self, request: PageRequest) -> Result<PageResponse<Menu>, AppError> {
        let (menus, total) = self.repo.page_menus(request.offset(), request.limit()).await?;
        Ok(PageResponse::new(menus, total, request))
    }

    pub async fn menus_by_parent(&self, parent_id: i32) -> Result<Vec<Menu>, AppError> {
        self.repo.list_by_parent(parent_id).await
    }

    /// Cria uma permissão do tipo menu ligada a este menu.
    pub async fn bind_menu_permission(
        &self,
        menu_id: i32,
        payload: &BindEntityPermissionPayload,
    ) -> Result<Permission, AppError> {
        self.get_menu(menu_id).await?;

        self.rbac_service
            .create_linked_permission(PermissionRecord {
                code: &payload.permission_code,
                name: &payload.name,
                permission_type: PermissionType::Menu,
                menu_id: Some(menu_id),
                button_id: None,
                parent_id: payload.parent_id,
            })
            .await
    }

    pub async fn menu_permissions(&self, menu_id: i32) -> Result<Vec<Permission>, AppError> {
        self.get_menu(menu_id).await?;
        self.rbac_service.permissions_by_menu(menu_id).await
    }

    async fn check_parent(&self, node: Option<i32>, parent_id: Option<i32>) -> Result<(), AppError> {
        let parent = parent_key(parent_id);
        if parent == ROOT {
            return Ok(());
        }

        let parents: HashMap<i32, Option<i32>> = self.repo.parent_links().await?.into_iter().collect();

        if !parents.contains_key(&parent) {
            return Err(AppError::Structural(format!("O menu pai {} não existe.", parent)));
        }
        if let Some(node) = node {
            if creates_cycle(&parents, node, parent) {
                return Err(AppError::Structural(format!(
                    "O menu {} não pode ficar abaixo de {}: criaria um ciclo.",
                    node, parent
                )));
            }
        }
        Ok(())
    }
}

fn menu_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Menu {} não encontrado.", id))
}
