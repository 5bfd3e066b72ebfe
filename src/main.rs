//! Server binary: reads config, opens the pool, mounts every route.

use rest_api::{app, db, telemetry, AppConfig, AppState, MySqlStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    telemetry::init(&config.access_log)?;

    let pool = db::connect(&config.db).await?;
    let state = AppState::new(Arc::new(MySqlStore::new(pool)), &config.public_url);

    let listener = TcpListener::bind((config.bind_addr.as_str(), config.port)).await?;
    tracing::info!("Server running on port {}", listener.local_addr()?.port());
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
