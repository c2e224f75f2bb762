pub mod user_repo;
pub use user_repo::UserRepository;
pub mod rbac_repo;
pub use rbac_repo::RbacRepository;
pub mod menu_repo;
pub use menu_repo::MenuRepository;
pub mod button_repo;
pub use button_repo::ButtonRepository;
