// src/models/permission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "permission_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    Menu,
    Button,
}

impl std::str::FromStr for PermissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(PermissionType::Menu),
            "button" => Ok(PermissionType::Button),
            other => Err(format!("Tipo de permissão desconhecido: '{other}'. Use 'menu' ou 'button'.")),
        }
    }
}

// O que sai do banco (Tabela permissions)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i32,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    pub menu_id: Option<i32>,
    pub button_id: Option<i32>,
    // NULL ou 0 = permissão raiz
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPayload {
    #[validate(length(min = 1, max = 255, message = "O código da permissão é obrigatório."))]
    pub code: String,
    #[validate(length(min = 1, max = 255, message = "O nome da permissão é obrigatório."))]
    pub name: String,
    #[serde(rename = "type")]
    pub permission_type: PermissionType,
    pub menu_id: Option<i32>,
    pub button_id: Option<i32>,
    pub parent_id: Option<i32>,
}

// Cria uma permissão já vinculada a um menu ou botão
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BindEntityPermissionPayload {
    #[validate(length(min = 1, max = 255, message = "O código da permissão é obrigatório."))]
    pub permission_code: String,
    #[validate(length(min = 1, max = 255, message = "O nome da permissão é obrigatório."))]
    pub name: String,
    pub parent_id: Option<i32>,
}

/// Nó da árvore de permissões de um cargo.
///
/// `enable` reflete apenas se o próprio id foi concedido; não herda do pai
/// nem dos filhos. `children` sempre aparece, mesmo vazio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionNode {
    pub id: i32,
    pub name: String,
    pub enable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub children: Vec<PermissionNode>,
}
