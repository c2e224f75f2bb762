pub mod association_service;
pub mod auth;
pub mod button_service;
pub mod menu_service;
pub mod permission_tree;
pub mod rbac_service;
pub mod route_tree;
pub mod tree;
pub mod user_service;
