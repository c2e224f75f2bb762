// src/db/menu_repo.rs

use sqlx::{types::Json, PgPool};

use crate::common::{db_utils::map_write_error, error::AppError};
use crate::models::menu::{Menu, MenuPayload};

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_menu(&self, payload: &MenuPayload) -> Result<Menu, AppError> {
        sqlx::query_as::<_, Menu>(
            r#"
            INSERT INTO menus (
                parent_id, name, path, component, icon,
                sort_order, meta, is_visible, button_association
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.parent_id)
        .bind(&payload.name)
        .bind(&payload.path)
        .bind(&payload.component)
        .bind(&payload.icon)
        .bind(payload.order)
        .bind(Json(&payload.meta))
        .bind(payload.is_visible)
        .bind(payload.button_association)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Menu duplicado."))
    }

    pub async fn update_menu(&self, id: i32, payload: &MenuPayload) -> Result<Option<Menu>, AppError> {
        sqlx::query_as::<_, Menu>(
            r#"
            UPDATE menus
            SET parent_id = $2, name = $3, path = $4, component = $5, icon = $6,
                sort_order = $7, meta = $8, is_visible = $9, button_association = $10,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.parent_id)
        .bind(&payload.name)
        .bind(&payload.path)
        .bind(&payload.component)
        .bind(&payload.icon)
        .bind(payload.order)
        .bind(Json(&payload.meta))
        .bind(payload.is_visible)
        .bind(payload.button_association)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Menu duplicado."))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Menu>, AppError> {
        let menu = sqlx::query_as::<_, Menu>("SELECT * FROM menus WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(menu)
    }

    pub async fn page_menus(&self, offset: i64, limit: i64) -> Result<(Vec<Menu>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(&self.pool)
            .await?;

        let menus = sqlx::query_as::<_, Menu>("SELECT * FROM menus ORDER BY id OFFSET $1 LIMIT $2")
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok((menus, total))
    }

    /// Filhos diretos; `parent_id = 0` também devolve os menus com pai NULL.
    pub async fn list_by_parent(&self, parent_id: i32) -> Result<Vec<Menu>, AppError> {
        let menus = sqlx::query_as::<_, Menu>(
            r#"
            SELECT * FROM menus
            WHERE COALESCE(parent_id, 0) = $1
            ORDER BY sort_order, id
            "#,
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(menus)
    }

    /// Catálogo completo para a árvore de rotas; a ordenação final é feita
    /// no montador.
    pub async fn list_all(&self) -> Result<Vec<Menu>, AppError> {
        let menus = sqlx::query_as::<_, Menu>("SELECT * FROM menus ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(menus)
    }

    pub async fn parent_links(&self) -> Result<Vec<(i32, Option<i32>)>, AppError> {
        let links = sqlx::query_as::<_, (i32, Option<i32>)>("SELECT id, parent_id FROM menus")
            .fetch_all(&self.pool)
            .await?;
        Ok(links)
    }
}
