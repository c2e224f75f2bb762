#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use tenant_center::config::{AppState, Config};
use tenant_center::models::menu::{MenuMeta, MenuPayload};
use tenant_center::models::permission::{PermissionPayload, PermissionType};
use tenant_center::models::role::RolePayload;
use tenant_center::routes;
use tenant_center::services::route_tree::AuthorityMode;

static COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Conecta em `TEST_DATABASE_URL`; sem a variável o teste é ignorado.
pub async fn setup() -> Option<TestApp> {
    setup_with(AuthorityMode::Permissive).await
}

pub async fn setup_with(route_authority: AuthorityMode) -> Option<TestApp> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL não definida; teste ignorado");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("falha ao conectar no banco de teste");
    sqlx::migrate!().run(&pool).await.expect("falha nas migrações");

    let config = Config {
        database_url,
        jwt_secret: "segredo-de-teste".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        max_connections: 5,
        token_ttl_hours: 1,
        route_authority,
    };
    let state = AppState::from_pool(pool, &config);

    Some(TestApp {
        router: routes::app(state.clone()),
        state,
    })
}

/// Sufixo único por execução, para não colidir com dados de outros testes.
pub fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!(
        "{prefix}-{}-{}-{nanos}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

pub fn role_payload(name: &str) -> RolePayload {
    RolePayload {
        name: name.to_string(),
        code: unique("ROLE"),
        description: None,
    }
}

pub fn permission_payload(name: &str, parent_id: Option<i32>) -> PermissionPayload {
    PermissionPayload {
        code: unique("perm"),
        name: name.to_string(),
        permission_type: PermissionType::Menu,
        menu_id: None,
        button_id: None,
        parent_id,
    }
}

pub fn menu_payload(name: &str, parent_id: Option<i32>, order: i32) -> MenuPayload {
    MenuPayload {
        parent_id,
        name: name.to_string(),
        path: format!("/{}", unique("path")),
        component: format!("@/views/{}", name.to_lowercase()),
        icon: String::new(),
        order,
        meta: MenuMeta {
            title: name.to_string(),
            icon: String::new(),
        },
        is_visible: true,
        button_association: false,
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
