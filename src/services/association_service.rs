// src/services/association_service.rs

use sqlx::PgPool;

use crate::{
    common::{db_utils::dedup_ids, error::AppError},
    db::{RbacRepository, UserRepository},
};

/// Troca atômica dos vínculos muitos-para-muitos.
///
/// As duas operações seguem a mesma política: a chave dona é travada, todos
/// os ids pedidos são validados contra o catálogo e qualquer id desconhecido
/// derruba a operação inteira. Só então os vínculos antigos são apagados e os
/// novos inseridos, tudo na mesma transação.
#[derive(Clone)]
pub struct AssociationService {
    user_repo: UserRepository,
    rbac_repo: RbacRepository,
    pool: PgPool,
}

impl AssociationService {
    pub fn new(user_repo: UserRepository, rbac_repo: RbacRepository, pool: PgPool) -> Self {
        Self { user_repo, rbac_repo, pool }
    }

    pub async fn replace_user_roles(&self, user_id: i32, role_ids: &[i32]) -> Result<Vec<i32>, AppError> {
        let role_ids = dedup_ids(role_ids);

        // 1. Inicia Transação
        let mut tx = self.pool.begin().await.map_err(into_tx_failure)?;

        let outcome = async {
            // 2. Trava o usuário (serializa trocas concorrentes do mesmo usuário)
            if !self.user_repo.lock_user(&mut *tx, user_id).await? {
                return Err(AppError::NotFound(format!("Usuário {} não encontrado.", user_id)));
            }

            // 3. Valida todos os cargos antes de tocar nos vínculos
            let found = self.rbac_repo.existing_role_ids(&mut *tx, &role_ids).await?;
            ensure_all_known(&role_ids, &found, "cargos")?;

            // 4. Apaga tudo e reinsere
            let removed = self.user_repo.delete_user_roles(&mut *tx, user_id).await?;
            if !role_ids.is_empty() {
                self.user_repo.insert_user_roles(&mut *tx, user_id, &role_ids).await?;
            }
            Ok::<u64, AppError>(removed)
        }
        .await
        .map_err(into_tx_failure_if_store)?;

        // 5. Commit; se falhar, nada foi alterado
        tx.commit().await.map_err(into_tx_failure)?;

        tracing::info!(
            user_id,
            removed = outcome,
            inserted = role_ids.len(),
            "Cargos do usuário substituídos"
        );
        Ok(role_ids)
    }

    pub async fn replace_role_permissions(
        &self,
        role_id: i32,
        permission_ids: &[i32],
    ) -> Result<Vec<i32>, AppError> {
        let permission_ids = dedup_ids(permission_ids);

        let mut tx = self.pool.begin().await.map_err(into_tx_failure)?;

        let outcome = async {
            if !self.rbac_repo.lock_role(&mut *tx, role_id).await? {
                return Err(AppError::NotFound(format!("Cargo {} não encontrado.", role_id)));
            }

            let found = self
                .rbac_repo
                .existing_permission_ids(&mut *tx, &permission_ids)
                .await?;
            ensure_all_known(&permission_ids, &found, "permissões")?;

            let removed = self.rbac_repo.delete_role_permissions(&mut *tx, role_id).await?;
            if !permission_ids.is_empty() {
                self.rbac_repo
                    .insert_role_permissions(&mut *tx, role_id, &permission_ids)
                    .await?;
            }
            Ok::<u64, AppError>(removed)
        }
        .await
        .map_err(into_tx_failure_if_store)?;

        tx.commit().await.map_err(into_tx_failure)?;

        tracing::info!(
            role_id,
            removed = outcome,
            inserted = permission_ids.len(),
            "Permissões do cargo substituídas"
        );
        Ok(permission_ids)
    }
}

/// Falha com `NotFound` listando os ids pedidos que não existem no catálogo.
pub(crate) fn ensure_all_known(requested: &[i32], found: &[i32], catalog: &str) -> Result<(), AppError> {
    let mut unknown: Vec<i32> = requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort_unstable();
    Err(AppError::NotFound(format!(
        "Ids de {} inexistentes: {:?}. Nenhum vínculo foi alterado.",
        catalog, unknown
    )))
}

fn into_tx_failure(e: sqlx::Error) -> AppError {
    AppError::TransactionFailure(e.to_string())
}

// Erros de cliente passam; erros de banco viram falha de transação
fn into_tx_failure_if_store(e: AppError) -> AppError {
    match e {
        AppError::DatabaseError(db_err) => into_tx_failure(db_err),
        other => other,
    }
}
