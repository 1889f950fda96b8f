use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod lists;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/catalog", catalog::router())
        .nest("/lists", lists::router())
}
