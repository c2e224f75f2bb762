// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{config::AppState, handlers, middleware::auth::auth_guard};

pub fn app(app_state: AppState) -> Router {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/", post(handlers::users::create_user))
        .route("/{id}", put(handlers::users::update_user))
        .route("/detail/{id}", get(handlers::users::get_user_detail))
        .route("/{id}/roles", post(handlers::users::bind_roles))
        .route("/routes", get(handlers::users::get_routes))
        .route("/me", get(handlers::users::get_me))
        .route("/page", post(handlers::users::page_users));

    let role_routes = Router::new()
        .route("/", post(handlers::rbac::create_role))
        .route("/{id}", put(handlers::rbac::update_role))
        .route("/detail/{id}", get(handlers::rbac::get_role))
        .route("/page", post(handlers::rbac::page_roles))
        .route("/{id}/bindPermissions", post(handlers::rbac::bind_permissions))
        .route("/{id}/permissions", get(handlers::rbac::get_role_permissions));

    let permission_routes = Router::new()
        .route("/", post(handlers::rbac::create_permission))
        .route("/{id}", put(handlers::rbac::update_permission))
        .route("/detail/{id}", get(handlers::rbac::get_permission))
        .route("/page", post(handlers::rbac::page_permissions))
        .route("/type/{type}", get(handlers::rbac::list_permissions_by_type));

    let menu_routes = Router::new()
        .route("/", post(handlers::menus::create_menu))
        .route("/{id}", put(handlers::menus::update_menu))
        .route("/detail/{id}", get(handlers::menus::get_menu))
        .route("/page", post(handlers::menus::page_menus))
        .route("/parent/{parent_id}", get(handlers::menus::list_menus_by_parent))
        .route("/{id}/permission", post(handlers::menus::bind_menu_permission))
        .route("/{id}/permissions", get(handlers::menus::get_menu_permissions));

    let button_routes = Router::new()
        .route("/", post(handlers::buttons::create_button))
        .route("/{id}", put(handlers::buttons::update_button))
        .route("/detail/{id}", get(handlers::buttons::get_button))
        .route("/menu/{menu_id}", get(handlers::buttons::list_buttons_by_menu))
        .route("/{id}/permission", post(handlers::buttons::bind_button_permission))
        .route("/{id}/permissions", get(handlers::buttons::get_button_permissions))
        .route("/page", post(handlers::buttons::page_buttons));

    // Tudo abaixo exige token válido
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/roles", role_routes)
        .nest("/permissions", permission_routes)
        .nest("/menus", menu_routes)
        .nest("/buttons", button_routes)
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
