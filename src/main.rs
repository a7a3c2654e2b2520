use std::sync::Arc;

use matty_api::config::{self, Environment};
use matty_api::store::{DesignStore, MemoryDesignStore, PgDesignStore};
use matty_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Matty API in {:?} mode", config.environment);

    let store: Arc<dyn DesignStore> = match &config.database.url {
        Some(url) => {
            match PgDesignStore::connect(url, config.database.max_connections).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::error!("database connection error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None if config.environment == Environment::Development => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryDesignStore::new())
        }
        None => {
            tracing::error!("DATABASE_URL must be set outside development");
            std::process::exit(1);
        }
    };

    let app = app(AppState { store });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Matty API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
