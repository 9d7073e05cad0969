//! Front-desk backend: validated create/list endpoints for hotel guest-services resources.

pub mod case;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use catalog::{Catalog, Resource};
pub use config::AppConfig;
pub use error::AppError;
pub use routes::{common_routes_with_ready, resource_routes};
pub use service::{CrudService, FieldError, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
