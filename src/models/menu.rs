// src/models/menu.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use validator::Validate;

// Metadados guardados em JSONB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i32,
    // NULL ou 0 = menu raiz
    pub parent_id: Option<i32>,
    pub name: String,
    pub path: String,
    pub component: String,
    pub icon: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub meta: Json<MenuMeta>,
    pub is_visible: bool,
    pub button_association: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usado tanto na criação quanto na atualização (substitui todos os campos)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub parent_id: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "O nome do menu é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "O caminho do menu é obrigatório."))]
    pub path: String,
    #[validate(length(min = 1, max = 255, message = "O componente do menu é obrigatório."))]
    pub component: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub meta: MenuMeta,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub button_association: bool,
}

fn default_visible() -> bool {
    true
}

// ---
// Árvore de rotas entregue ao frontend
// ---
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteNode {
    pub component: String,
    pub name: String,
    pub path: String,
    pub meta: RouteMeta,
    // Ausente (não vazio) quando o nó é folha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<Vec<i32>>,
}
