pub mod auth;
pub mod catalog;
pub mod items;
pub mod lists;
