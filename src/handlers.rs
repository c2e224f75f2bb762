pub mod auth;
pub mod buttons;
pub mod menus;
pub mod rbac;
pub mod users;
