//! Create/list routes for all resources. The path segment selects the
//! resource; handlers resolve it through the catalog and return 404 for
//! segments it does not name.

use crate::handlers::resource::{create, list};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/:segment", get(list).post(create))
        .with_state(state)
}
