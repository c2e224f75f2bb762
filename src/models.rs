pub mod auth;
pub mod button;
pub mod menu;
pub mod pagination;
pub mod permission;
pub mod role;
pub mod user;
