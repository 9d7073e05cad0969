//! Server binary: bootstrap the database, build the router, serve.

use frontdesk::{
    common_routes_with_ready, ensure_database_exists, ensure_tables, resource_routes, AppConfig,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frontdesk=info")),
        )
        .init();

    let config = AppConfig::from_env();
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState::new(pool);
    let app = common_routes_with_ready(state.clone())
        .merge(resource_routes(state))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
