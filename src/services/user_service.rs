// src/services/user_service.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::{MenuRepository, RbacRepository, UserRepository};
use crate::models::menu::RouteNode;
use crate::models::pagination::{PageRequest, PageResponse};
use crate::models::user::{CreateUserPayload, UpdateUserPayload, User, UserDetail};
use crate::services::auth::hash_password;
use crate::services::route_tree::{
    build_route_tree, AuthorityMode, GrantedMenuPermissions, Permissive,
};

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    rbac_repo: RbacRepository,
    menu_repo: MenuRepository,
    authority_mode: AuthorityMode,
    pool: PgPool,
}

impl UserService {
    pub fn new(
        user_repo: UserRepository,
        rbac_repo: RbacRepository,
        menu_repo: MenuRepository,
        authority_mode: AuthorityMode,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, rbac_repo, menu_repo, authority_mode, pool }
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let hashed_password = hash_password(&payload.password).await?;

        let user = self
            .user_repo
            .create_user(&self.pool, &payload.username, &hashed_password)
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "Usuário criado");
        Ok(user)
    }

    pub async fn update_user(&self, id: i32, payload: &UpdateUserPayload) -> Result<User, AppError> {
        let hashed_password = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        self.user_repo
            .update_user(id, &payload.username, hashed_password.as_deref())
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn get_user_detail(&self, id: i32) -> Result<UserDetail, AppError> {
        let user = self.user_repo.find_by_id(id).await?.ok_or_else(|| user_not_found(id))?;
        let roles = self.user_repo.role_ids_for_user(id).await?;
        Ok(UserDetail { user, roles })
    }

    pub async fn page_users(&self, request: PageRequest) -> Result<PageResponse<User>, AppError> {
        let (users, total) = self.user_repo.page_users(request.offset(), request.limit()).await?;
        Ok(PageResponse::new(users, total, request))
    }

    /// Árvore de navegação do usuário autenticado.
    pub async fn user_routes(&self, user_id: i32) -> Result<Vec<RouteNode>, AppError> {
        let menus = self.menu_repo.list_all().await?;

        let tree = match self.authority_mode {
            AuthorityMode::Permissive => build_route_tree(&menus, &Permissive)?,
            AuthorityMode::Granted => {
                let granted = self.rbac_repo.menu_permissions_for_user(user_id).await?;
                let policy = GrantedMenuPermissions::from_permissions(&granted);
                build_route_tree(&menus, &policy)?
            }
        };

        Ok(tree)
    }
}

fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Usuário {} não encontrado.", id))
}
