// src/services/rbac_service.rs

use std::collections::{HashMap, HashSet};

use crate::common::error::AppError;
use crate::db::{rbac_repo::PermissionRecord, MenuRepository, RbacRepository};
use crate::models::pagination::{PageRequest, PageResponse};
use crate::models::permission::{Permission, PermissionNode, PermissionPayload, PermissionType};
use crate::models::role::{Role, RolePayload};
use crate::services::permission_tree::build_permission_tree_with_icons;
use crate::services::tree::{creates_cycle, parent_key, ROOT};

#[derive(Clone)]
pub struct RbacService {
    repo: RbacRepository,
    menu_repo: MenuRepository,
}

impl RbacService {
    pub fn new(repo: RbacRepository, menu_repo: MenuRepository) -> Self {
        Self { repo, menu_repo }
    }

    // ---
    // Cargos
    // ---

    pub async fn create_role(&self, payload: &RolePayload) -> Result<Role, AppError> {
        let role = self
            .repo
            .create_role(&payload.code, &payload.name, payload.description.as_deref().unwrap_or(""))
            .await?;
        tracing::info!(role_id = role.id, code = %role.code, "Cargo criado");
        Ok(role)
    }

    pub async fn update_role(&self, id: i32, payload: &RolePayload) -> Result<Role, AppError> {
        self.repo
            .update_role(id, &payload.code, &payload.name, payload.description.as_deref().unwrap_or(""))
            .await?
            .ok_or_else(|| role_not_found(id))
    }

    pub async fn get_role(&self, id: i32) -> Result<Role, AppError> {
        self.repo.find_role_by_id(id).await?.ok_or_else(|| role_not_found(id))
    }

    pub async fn page_roles(&self, request: PageRequest) -> Result<PageResponse<Role>, AppError> {
        let (roles, total) = self.repo.page_roles(request.offset(), request.limit()).await?;
        Ok(PageResponse::new(roles, total, request))
    }

    /// Catálogo inteiro de permissões com `enable` marcando o que o cargo tem.
    pub async fn role_permission_tree(&self, role_id: i32) -> Result<Vec<PermissionNode>, AppError> {
        self.get_role(role_id).await?;

        let catalog = self.repo.list_all_permissions().await?;
        let granted: HashSet<i32> = self
            .repo
            .permission_ids_for_role(role_id)
            .await?
            .into_iter()
            .collect();

        let menu_icons: HashMap<i32, String> = self
            .menu_repo
            .list_all()
            .await?
            .into_iter()
            .filter(|menu| !menu.icon.is_empty())
            .map(|menu| (menu.id, menu.icon))
            .collect();

        let tree = build_permission_tree_with_icons(&catalog, &granted, &menu_icons)?;
        Ok(tree)
    }

    // ---
    // Permissões
    // ---

    pub async fn create_permission(&self, payload: &PermissionPayload) -> Result<Permission, AppError> {
        self.check_permission_parent(None, payload.parent_id).await?;

        let permission = self.repo.create_permission(&record_from(payload)).await?;
        tracing::info!(permission_id = permission.id, code = %permission.code, "Permissão criada");
        Ok(permission)
    }

    pub async fn update_permission(
        &self,
        id: i32,
        payload: &PermissionPayload,
    ) -> Result<Permission, AppError> {
        self.check_permission_parent(Some(id), payload.parent_id).await?;

        self.repo
            .update_permission(id, &record_from(payload))
            .await?
            .ok_or_else(|| permission_not_found(id))
    }

    /// Cria uma permissão já ligada a um menu ou botão (vínculo de entidade).
    pub(crate) async fn create_linked_permission(
        &self,
        record: PermissionRecord<'_>,
    ) -> Result<Permission, AppError> {
        self.check_permission_parent(None, record.parent_id).await?;
        self.repo.create_permission(&record).await
    }

    pub async fn get_permission(&self, id: i32) -> Result<Permission, AppError> {
        self.repo
            .find_permission_by_id(id)
            .await?
            .ok_or_else(|| permission_not_found(id))
    }

    pub async fn page_permissions(
        &self,
        request: PageRequest,
    ) -> Result<PageResponse<Permission>, AppError> {
        let (permissions, total) = self
            .repo
            .page_permissions(request.offset(), request.limit())
            .await?;
        Ok(PageResponse::new(permissions, total, request))
    }

    pub async fn permissions_by_type(
        &self,
        permission_type: PermissionType,
    ) -> Result<Vec<Permission>, AppError> {
        self.repo.list_permissions_by_type(permission_type).await
    }

    pub async fn permissions_by_menu(&self, menu_id: i32) -> Result<Vec<Permission>, AppError> {
        self.repo.list_permissions_by_menu(menu_id).await
    }

    pub async fn permissions_by_button(&self, button_id: i32) -> Result<Vec<Permission>, AppError> {
        self.repo.list_permissions_by_button(button_id).await
    }

    /// O pai precisa existir e não pode ser o próprio nó nem um descendente dele.
    async fn check_permission_parent(
        &self,
        node: Option<i32>,
        parent_id: Option<i32>,
    ) -> Result<(), AppError> {
        let parent = parent_key(parent_id);
        if parent == ROOT {
            return Ok(());
        }

        let parents: HashMap<i32, Option<i32>> =
            self.repo.permission_parent_links().await?.into_iter().collect();

        if !parents.contains_key(&parent) {
            return Err(AppError::Structural(format!(
                "A permissão pai {} não existe.",
                parent
            )));
        }
        if let Some(node) = node {
            if creates_cycle(&parents, node, parent) {
                return Err(AppError::Structural(format!(
                    "A permissão {} não pode ficar abaixo de {}: criaria um ciclo.",
                    node, parent
                )));
            }
        }
        Ok(())
    }
}

fn record_from(payload: &PermissionPayload) -> PermissionRecord<'_> {
    PermissionRecord {
        code: &payload.code,
        name: &payload.name,
        permission_type: payload.permission_type,
        menu_id: payload.menu_id,
        button_id: payload.button_id,
        parent_id: payload.parent_id,
    }
}

fn role_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Cargo {} não encontrado.", id))
}

fn permission_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Permissão {} não encontrada.", id))
}
