// src/models/pagination.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MAX_PAGE: i64 = 1_000_000;
pub const MAX_PAGE_SIZE: i64 = 1_000;

// Pedido de página: ambos obrigatórios e >= 1 (páginas começam em 1)
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[validate(range(min = 1, max = MAX_PAGE, message = "A página deve estar entre 1 e 1000000."))]
    pub page: i64,
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "O tamanho da página deve estar entre 1 e 1000."))]
    pub page_size: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        // Satura em vez de estourar se chamado sem validar antes
        self.page.saturating_sub(1).max(0).saturating_mul(self.page_size.max(0))
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> PageResponse<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            data,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }
}
