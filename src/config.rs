// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use anyhow::Context;

use crate::{
    db::{ButtonRepository, MenuRepository, RbacRepository, UserRepository},
    services::{
        association_service::AssociationService, auth::AuthService, button_service::ButtonService,
        menu_service::MenuService, rbac_service::RbacService, route_tree::AuthorityMode,
        user_service::UserService,
    },
};

// Configuração lida do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub token_ttl_hours: i64,
    pub route_authority: AuthorityMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET não pode ser vazio");
        }

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: '{raw}'"))?,
            None => 5,
        };

        let token_ttl_hours = match lookup("TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("TOKEN_TTL_HOURS inválido: '{raw}'"))?,
            None => 24,
        };

        let route_authority = match lookup("ROUTE_AUTHORITY") {
            Some(raw) => raw.parse().map_err(anyhow::Error::msg)?,
            None => AuthorityMode::default(),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            max_connections,
            token_ttl_hours,
            route_authority,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub rbac_service: RbacService,
    pub association_service: AssociationService,
    pub menu_service: MenuService,
    pub button_service: ButtonService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let menu_repo = MenuRepository::new(db_pool.clone());
        let button_repo = ButtonRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
        );
        let rbac_service = RbacService::new(rbac_repo.clone(), menu_repo.clone());
        let user_service = UserService::new(
            user_repo.clone(),
            rbac_repo.clone(),
            menu_repo.clone(),
            config.route_authority,
            db_pool.clone(),
        );
        let association_service = AssociationService::new(user_repo, rbac_repo, db_pool.clone());
        let menu_service = MenuService::new(menu_repo, rbac_service.clone());
        let button_service = ButtonService::new(button_repo, rbac_service.clone());

        Self {
            db_pool,
            auth_service,
            user_service,
            rbac_service,
            association_service,
            menu_service,
            button_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/rbac"),
            ("JWT_SECRET", "segredo"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.route_authority, AuthorityMode::Permissive);
    }

    #[test]
    fn secret_is_required() {
        assert!(Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).is_err());
        assert!(Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "  "),
        ]))
        .is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("TOKEN_TTL_HOURS", "2"),
            ("ROUTE_AUTHORITY", "granted"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.token_ttl_hours, 2);
        assert_eq!(config.route_authority, AuthorityMode::Granted);
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("TOKEN_TTL_HOURS", "um dia"),
        ]));
        assert!(result.is_err());
    }
}
