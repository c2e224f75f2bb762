// src/db/button_repo.rs

use sqlx::PgPool;

use crate::common::{db_utils::map_write_error, error::AppError};
use crate::models::button::{Button, ButtonPayload};

#[derive(Clone)]
pub struct ButtonRepository {
    pool: PgPool,
}

impl ButtonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // O menu inexistente é barrado pela FK (vira erro estrutural)
    pub async fn create_button(&self, payload: &ButtonPayload) -> Result<Button, AppError> {
        sqlx::query_as::<_, Button>(
            r#"
            INSERT INTO buttons (name, action, menu_id, permission_code)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.action)
        .bind(payload.menu_id)
        .bind(&payload.permission_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Botão duplicado."))
    }

    pub async fn update_button(
        &self,
        id: i32,
        payload: &ButtonPayload,
    ) -> Result<Option<Button>, AppError> {
        sqlx::query_as::<_, Button>(
            r#"
            UPDATE buttons
            SET name = $2, action = $3, menu_id = $4, permission_code = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.action)
        .bind(payload.menu_id)
        .bind(&payload.permission_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Botão duplicado."))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Button>, AppError> {
        let button = sqlx::query_as::<_, Button>("SELECT * FROM buttons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(button)
    }

    pub async fn page_buttons(&self, offset: i64, limit: i64) -> Result<(Vec<Button>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buttons")
            .fetch_one(&self.pool)
            .await?;

        let buttons =
            sqlx::query_as::<_, Button>("SELECT * FROM buttons ORDER BY id OFFSET $1 LIMIT $2")
                .bind(offset)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok((buttons, total))
    }

    pub async fn list_by_menu(&self, menu_id: i32) -> Result<Vec<Button>, AppError> {
        let buttons =
            sqlx::query_as::<_, Button>("SELECT * FROM buttons WHERE menu_id = $1 ORDER BY id")
                .bind(menu_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(buttons)
    }
}
