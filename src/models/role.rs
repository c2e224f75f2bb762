// src/models/role.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// O que sai do banco (Tabela roles)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload para criar ou atualizar um cargo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload {
    #[validate(length(min = 1, max = 255, message = "O nome do cargo é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "O código do cargo é obrigatório."))]
    pub code: String,
    pub description: Option<String>,
}

// Substitui todas as permissões do cargo (ids inteiros)
#[derive(Debug, Deserialize)]
pub struct BindPermissionsPayload {
    pub permissions: Vec<i32>,
}
