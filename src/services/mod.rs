pub mod auth_service;
pub mod catalog_service;
pub mod item_service;
pub mod list_service;
