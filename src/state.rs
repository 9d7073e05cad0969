//! Shared application state for all routes.

use crate::catalog::Catalog;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Static resource catalog; built once at startup.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            pool,
            catalog: Arc::new(Catalog::new()),
        }
    }
}
