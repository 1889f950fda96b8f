use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    store::{ListStore, PgListStore},
};

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub lists: Arc<dyn ListStore>,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: DbPool, orm: OrmConn) -> Self {
        let lists: Arc<dyn ListStore> = Arc::new(PgListStore::new(pool.clone(), orm.clone()));
        Self {
            pool,
            orm,
            lists,
            auth: AuthSettings {
                jwt_secret: config.jwt_secret.clone(),
                token_ttl_hours: config.jwt_ttl_hours,
            },
        }
    }
}
