//! Task board API server
//!
//! Serves the board's REST API: paginated task listing per status column
//! plus task create/update/delete. The storage backend is picked at
//! startup; the protocol is identical against either.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tb_core::column::ColumnConfig;
use tb_core::task::{FileTaskStore, MemoryTaskStore, TaskStore};

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let columns = match std::env::var("TB_COLUMNS") {
        Ok(spec) => {
            ColumnConfig::parse_spec(&spec).expect("TB_COLUMNS contains no usable columns")
        }
        Err(_) => ColumnConfig::default(),
    };
    tracing::info!(
        entry = columns.entry_key(),
        "column pipeline: {:?}",
        columns.keys().collect::<Vec<_>>()
    );

    // File-backed store when TB_DATA_DIR is set, otherwise in-memory.
    let store: Arc<dyn TaskStore> = match std::env::var("TB_DATA_DIR") {
        Ok(dir) => {
            let path = PathBuf::from(dir).join("tasks.json");
            tracing::info!("using file store at {:?}", path);
            Arc::new(
                FileTaskStore::new(path, columns.clone())
                    .await
                    .expect("Failed to open task store"),
            )
        }
        Err(_) => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryTaskStore::new(columns.clone()))
        }
    };

    let app_state = AppState::new(store, columns);

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("TB_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
