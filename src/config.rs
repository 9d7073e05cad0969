//! Environment-driven server configuration.

use std::env;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/frontdesk";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Request body cap for all routes; payloads here are small forms.
    pub max_body_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr: var_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::debug!("{} not set, using default", key);
        default.to_string()
    })
}
