mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use tenant_center::models::user::CreateUserPayload;

use common::{menu_payload, send, setup, unique, TestApp};

// Cria um usuário e devolve (id, token)
async fn login_as_new_user(app: &TestApp) -> (i32, String) {
    let username = unique("api");
    let user = app
        .state
        .user_service
        .create_user(&CreateUserPayload {
            username: username.clone(),
            password: "senha-forte".to_string(),
        })
        .await
        .unwrap();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": username, "password": "senha-forte" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (user.id, body["token"].as_str().unwrap().to_string())
}

fn find_route<'a>(nodes: &'a [Value], name: &str) -> Option<&'a Value> {
    nodes.iter().find_map(|node| {
        if node["name"] == name {
            return Some(node);
        }
        node["children"]
            .as_array()
            .and_then(|children| find_route(children, name))
    })
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let Some(app) = setup().await else { return };

    let (status, _) = send(&app.router, Method::GET, "/api/users/routes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        Method::GET,
        "/api/users/routes",
        Some("nao-e-um-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_credentials_are_rejected() {
    let Some(app) = setup().await else { return };

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "username": unique("ninguem"), "password": "qualquer" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn me_returns_the_token_owner_without_password() {
    let Some(app) = setup().await else { return };
    let (user_id, token) = login_as_new_user(&app).await;

    let (status, body) = send(&app.router, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id);
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn route_tree_is_nested_and_ordered() {
    let Some(app) = setup().await else { return };
    let (_, token) = login_as_new_user(&app).await;
    let menus = &app.state.menu_service;

    let root_name = unique("Sistema");
    let root = menus.create_menu(&menu_payload(&root_name, None, 1)).await.unwrap();
    let second = unique("Cargos");
    let first = unique("Usuarios");
    menus.create_menu(&menu_payload(&second, Some(root.id), 2)).await.unwrap();
    menus.create_menu(&menu_payload(&first, Some(root.id), 1)).await.unwrap();

    let (status, body) = send(&app.router, Method::GET, "/api/users/routes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let routes = body.as_array().unwrap();
    let node = find_route(routes, &root_name).expect("menu raiz ausente");
    assert_eq!(node["meta"]["title"], root_name.as_str());
    assert_eq!(node["meta"]["authority"], json!([1]));

    let children = node["children"].as_array().unwrap();
    let names: Vec<&str> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec![first.as_str(), second.as_str()]);
    // Folhas não trazem "children"
    assert!(children[0].get("children").is_none());
}

#[tokio::test]
async fn bind_endpoints_report_client_errors() {
    let Some(app) = setup().await else { return };
    let (user_id, token) = login_as_new_user(&app).await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/api/users/{user_id}/roles"),
        Some(&token),
        Some(json!({ "roles": [i32::MAX] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&i32::MAX.to_string()));

    let (status, body) = send(
        &app.router,
        Method::POST,
        &format!("/api/users/{user_id}/roles"),
        Some(&token),
        Some(json!({ "roles": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "roles": [] }));
}

#[tokio::test]
async fn role_permission_round_trip_over_http() {
    let Some(app) = setup().await else { return };
    let (_, token) = login_as_new_user(&app).await;

    let (status, role) = send(
        &app.router,
        Method::POST,
        "/api/roles",
        Some(&token),
        Some(json!({ "name": "Gerente", "code": unique("GERENTE") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let role_id = role["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for name in ["P1", "P2", "P3"] {
        let (status, perm) = send(
            &app.router,
            Method::POST,
            "/api/permissions",
            Some(&token),
            Some(json!({ "code": unique(name), "name": name, "type": "menu" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(perm["id"].as_i64().unwrap());
    }

    let (status, _) = send(
        &app.router,
        Method::POST,
        &format!("/api/roles/{role_id}/bindPermissions"),
        Some(&token),
        Some(json!({ "permissions": [ids[0], ids[2]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, tree) = send(
        &app.router,
        Method::GET,
        &format!("/api/roles/{role_id}/permissions"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let enabled: Vec<bool> = ids
        .iter()
        .map(|id| {
            tree.as_array()
                .unwrap()
                .iter()
                .find(|node| node["id"] == *id)
                .map(|node| node["enable"].as_bool().unwrap())
                .unwrap()
        })
        .collect();
    assert_eq!(enabled, vec![true, false, true]);
}

#[tokio::test]
async fn permission_parent_cycle_is_rejected() {
    let Some(app) = setup().await else { return };
    let (_, token) = login_as_new_user(&app).await;

    let parent_code = unique("pai");
    let (_, parent) = send(
        &app.router,
        Method::POST,
        "/api/permissions",
        Some(&token),
        Some(json!({ "code": parent_code, "name": "Pai", "type": "menu" })),
    )
    .await;
    let parent_id = parent["id"].as_i64().unwrap();

    let (_, child) = send(
        &app.router,
        Method::POST,
        "/api/permissions",
        Some(&token),
        Some(json!({ "code": unique("filho"), "name": "Filho", "type": "menu", "parentId": parent_id })),
    )
    .await;
    let child_id = child["id"].as_i64().unwrap();

    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/permissions/{parent_id}"),
        Some(&token),
        Some(json!({ "code": parent_code, "name": "Pai", "type": "menu", "parentId": child_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn pagination_is_validated() {
    let Some(app) = setup().await else { return };
    let (_, token) = login_as_new_user(&app).await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/users/page",
        Some(&token),
        Some(json!({ "page": 1, "pageSize": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["page_size"].is_array());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/users/page",
        Some(&token),
        Some(json!({ "page": 1, "pageSize": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().len() <= 2);
    assert!(body["total"].as_i64().unwrap() >= 1);
}
