//! Shopping list service: static product catalog, per-user shopping lists, priced
//! list items and trip summaries, served over a JSON API.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod summary;
