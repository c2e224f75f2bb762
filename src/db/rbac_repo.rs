// src/db/rbac_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::common::{db_utils::map_write_error, error::AppError};
use crate::models::permission::{Permission, PermissionType};
use crate::models::role::Role;

// Campos graváveis de uma permissão
#[derive(Debug, Clone)]
pub struct PermissionRecord<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub permission_type: PermissionType,
    pub menu_id: Option<i32>,
    pub button_id: Option<i32>,
    pub parent_id: Option<i32>,
}

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CARGOS
    // =========================================================================

    pub async fn create_role(
        &self,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("Já existe um cargo com o código '{}'.", code)))
    }

    pub async fn update_role(
        &self,
        id: i32,
        code: &str,
        name: &str,
        description: &str,
    ) -> Result<Option<Role>, AppError> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles
            SET code = $2, name = $3, description = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(code)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("Já existe um cargo com o código '{}'.", code)))
    }

    pub async fn find_role_by_id(&self, id: i32) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    pub async fn page_roles(&self, offset: i64, limit: i64) -> Result<(Vec<Role>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;

        let roles = sqlx::query_as::<_, Role>("SELECT * FROM roles ORDER BY id OFFSET $1 LIMIT $2")
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok((roles, total))
    }

    /// Quais dos ids informados existem no catálogo de cargos.
    pub async fn existing_role_ids<'e, E>(&self, executor: E, ids: &[i32]) -> Result<Vec<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Vec<i32> = sqlx::query_scalar("SELECT id FROM roles WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(found)
    }

    /// Trava a linha do cargo até o fim da transação.
    pub async fn lock_role<'e, E>(&self, executor: E, role_id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: Option<i32> = sqlx::query_scalar("SELECT id FROM roles WHERE id = $1 FOR UPDATE")
            .bind(role_id)
            .fetch_optional(executor)
            .await?;
        Ok(row.is_some())
    }

    // =========================================================================
    //  PERMISSÕES
    // =========================================================================

    pub async fn create_permission(&self, record: &PermissionRecord<'_>) -> Result<Permission, AppError> {
        sqlx::query_as::<_, Permission>(
            r#"
            INSERT INTO permissions (code, name, permission_type, menu_id, button_id, parent_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(record.code)
        .bind(record.name)
        .bind(record.permission_type)
        .bind(record.menu_id)
        .bind(record.button_id)
        .bind(record.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, format!("Já existe uma permissão com o código '{}'.", record.code))
        })
    }

    pub async fn update_permission(
        &self,
        id: i32,
        record: &PermissionRecord<'_>,
    ) -> Result<Option<Permission>, AppError> {
        sqlx::query_as::<_, Permission>(
            r#"
            UPDATE permissions
            SET code = $2, name = $3, permission_type = $4,
                menu_id = $5, button_id = $6, parent_id = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.code)
        .bind(record.name)
        .bind(record.permission_type)
        .bind(record.menu_id)
        .bind(record.button_id)
        .bind(record.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, format!("Já existe uma permissão com o código '{}'.", record.code))
        })
    }

    pub async fn find_permission_by_id(&self, id: i32) -> Result<Option<Permission>, AppError> {
        let permission = sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(permission)
    }

    pub async fn page_permissions(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Permission>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM permissions")
            .fetch_one(&self.pool)
            .await?;

        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok((permissions, total))
    }

    /// Catálogo completo, em ordem de id (a ordem dos irmãos na árvore).
    pub async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>("SELECT * FROM permissions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(permissions)
    }

    pub async fn list_permissions_by_type(
        &self,
        permission_type: PermissionType,
    ) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE permission_type = $1 ORDER BY id",
        )
        .bind(permission_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    pub async fn list_permissions_by_menu(&self, menu_id: i32) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE menu_id = $1 AND permission_type = 'menu' ORDER BY id",
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    pub async fn list_permissions_by_button(
        &self,
        button_id: i32,
    ) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE button_id = $1 AND permission_type = 'button' ORDER BY id",
        )
        .bind(button_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    /// Pares (id, parent_id) de todo o catálogo, para checar ciclos antes de gravar.
    pub async fn permission_parent_links(&self) -> Result<Vec<(i32, Option<i32>)>, AppError> {
        let links = sqlx::query_as::<_, (i32, Option<i32>)>("SELECT id, parent_id FROM permissions")
            .fetch_all(&self.pool)
            .await?;
        Ok(links)
    }

    pub async fn existing_permission_ids<'e, E>(
        &self,
        executor: E,
        ids: &[i32],
    ) -> Result<Vec<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Vec<i32> = sqlx::query_scalar("SELECT id FROM permissions WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await?;
        Ok(found)
    }

    // =========================================================================
    //  VÍNCULOS CARGO <-> PERMISSÃO
    // =========================================================================

    pub async fn permission_ids_for_role(&self, role_id: i32) -> Result<Vec<i32>, AppError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT permission_id FROM role_permissions WHERE role_id = $1 ORDER BY permission_id",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn delete_role_permissions<'e, E>(&self, executor: E, role_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert_role_permissions<'e, E>(
        &self,
        executor: E,
        role_id: i32,
        permission_ids: &[i32],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Inserção em massa usando UNNEST para performance
        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, unnest($2::int4[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Permissões do tipo menu alcançáveis pelo usuário através dos seus cargos.
    pub async fn menu_permissions_for_user(&self, user_id: i32) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT DISTINCT p.*
            FROM user_roles ur
            JOIN role_permissions rp ON rp.role_id = ur.role_id
            JOIN permissions p ON p.id = rp.permission_id
            WHERE ur.user_id = $1
              AND p.permission_type = 'menu'
            ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }
}
