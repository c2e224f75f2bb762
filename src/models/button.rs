// src/models/button.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub id: i32,
    pub name: String,
    pub action: String,
    pub menu_id: i32,
    pub permission_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ButtonPayload {
    #[validate(length(min = 1, max = 255, message = "O nome do botão é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "A ação do botão é obrigatória."))]
    pub action: String,
    pub menu_id: i32,
    #[validate(length(min = 1, max = 255, message = "O código de permissão é obrigatório."))]
    pub permission_code: String,
}
