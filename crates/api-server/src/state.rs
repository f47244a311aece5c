//! Application state

use std::sync::Arc;

use tb_core::column::ColumnConfig;
use tb_core::query::QueryEngine;
use tb_core::service::TaskService;
use tb_core::task::TaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    columns: ColumnConfig,
    query_engine: QueryEngine,
    service: TaskService,
}

impl AppState {
    /// Build the state around a storage backend
    pub fn new(store: Arc<dyn TaskStore>, columns: ColumnConfig) -> Self {
        let query_engine = QueryEngine::new(Arc::clone(&store));
        let service = TaskService::new(store, columns.clone());

        Self {
            inner: Arc::new(AppStateInner {
                columns,
                query_engine,
                service,
            }),
        }
    }

    /// The configured column pipeline
    pub fn columns(&self) -> &ColumnConfig {
        &self.inner.columns
    }

    /// Read side: paginated per-status queries
    pub fn query_engine(&self) -> &QueryEngine {
        &self.inner.query_engine
    }

    /// Write side: validated task mutations
    pub fn service(&self) -> &TaskService {
        &self.inner.service
    }
}
