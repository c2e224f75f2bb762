// src/common/db_utils.rs

use crate::common::error::AppError;

// ---
// Tradução de erros de escrita do Postgres
// ---
/// Converte violações de unicidade em `Conflict` e violações de chave
/// estrangeira em `Structural`; o resto segue como erro de banco.
pub(crate) fn map_write_error(e: sqlx::Error, conflict_message: impl Into<String>) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict_message.into());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::Structural(format!(
                "Referência inexistente: {}",
                db_err.constraint().unwrap_or("chave estrangeira")
            ));
        }
    }
    e.into()
}

/// Remove ids repetidos mantendo a ordem da primeira ocorrência.
pub(crate) fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
