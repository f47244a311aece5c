//! Paginated queries over the task store
//!
//! Slices one status column's tasks into pages. Page numbers are 1-based;
//! an offset past the end of the column is an ordinary empty page, not an
//! error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStore};
use crate::{Error, Result};

/// Page size applied when the caller does not specify a limit
pub const DEFAULT_PAGE_LIMIT: i64 = 5;

/// One page of tasks for a single status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub current_page: u64,
    pub total_pages: u64,
}

/// Read side of the board: status-filtered, paginated task queries
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn TaskStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Fetch one page of tasks for `status`.
    ///
    /// `page` defaults to 1 and `limit` to [`DEFAULT_PAGE_LIMIT`]; both are
    /// coerced to at least 1.
    pub async fn query(
        &self,
        status: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<TaskPage> {
        if status.trim().is_empty() {
            return Err(Error::MissingStatus);
        }

        let page = page.unwrap_or(1).max(1) as u64;
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1) as u64;
        let offset = (page - 1) * limit;

        let count = self.store.count_by_status(status).await? as u64;
        let total_pages = count.div_ceil(limit);
        let tasks = self
            .store
            .list_by_status(status, offset as usize, limit as usize)
            .await?;

        Ok(TaskPage {
            tasks,
            current_page: page,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnConfig;
    use crate::task::{MemoryTaskStore, TaskPatch};

    async fn engine_with_pending(count: usize) -> QueryEngine {
        let store = Arc::new(MemoryTaskStore::new(ColumnConfig::default()));
        for i in 1..=count {
            store.insert(&format!("Task {i}")).await.unwrap();
        }
        QueryEngine::new(store)
    }

    #[tokio::test]
    async fn test_second_page_of_seven() {
        let engine = engine_with_pending(7).await;

        let page = engine.query("pending", Some(2), Some(5)).await.unwrap();
        assert_eq!(page.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), [6, 7]);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_defaults() {
        let engine = engine_with_pending(7).await;

        // page defaults to 1, limit to 5
        let page = engine.query("pending", None, None).await.unwrap();
        assert_eq!(page.tasks.len(), 5);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_non_positive_page_and_limit_coerced() {
        let engine = engine_with_pending(3).await;

        let page = engine.query("pending", Some(0), Some(-2)).await.unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_limit_bounds_item_count() {
        let engine = engine_with_pending(4).await;

        for limit in 1..=6 {
            let page = engine.query("pending", Some(1), Some(limit)).await.unwrap();
            assert!(page.tasks.len() as i64 <= limit);
        }
    }

    #[tokio::test]
    async fn test_empty_status_has_zero_pages() {
        let engine = engine_with_pending(3).await;

        let page = engine.query("inProgress", None, None).await.unwrap();
        assert!(page.tasks.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_not_error() {
        let engine = engine_with_pending(3).await;

        let page = engine.query("pending", Some(9), Some(5)).await.unwrap();
        assert!(page.tasks.is_empty());
        assert_eq!(page.current_page, 9);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_missing_status() {
        let engine = engine_with_pending(1).await;

        assert!(matches!(
            engine.query("", None, None).await,
            Err(Error::MissingStatus)
        ));
        assert!(matches!(
            engine.query("   ", None, None).await,
            Err(Error::MissingStatus)
        ));
    }

    #[tokio::test]
    async fn test_total_pages_tracks_moves() {
        let store = Arc::new(MemoryTaskStore::new(ColumnConfig::default()));
        for i in 1..=6 {
            store.insert(&format!("Task {i}")).await.unwrap();
        }
        store
            .update_fields(6, TaskPatch::new().with_status("inProgress"))
            .await
            .unwrap();
        let engine = QueryEngine::new(store);

        let page = engine.query("pending", Some(1), Some(5)).await.unwrap();
        assert_eq!(page.total_pages, 1);
        let page = engine.query("inProgress", Some(1), Some(5)).await.unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.tasks[0].id, 6);
    }
}
