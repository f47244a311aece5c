//! Task store trait
//!
//! Defines the storage interface the synchronization protocol runs against.
//! Backends only need to provide these operations; the pagination and
//! mutation layers never look behind this boundary.

use async_trait::async_trait;

use super::model::{Task, TaskId, TaskPatch};
use crate::Result;

/// Storage interface for task records
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task with a freshly allocated id, placed in the entry
    /// column
    async fn insert(&self, text: &str) -> Result<Task>;

    /// Fetch a task by id
    async fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// Apply the provided fields of `patch`, leaving the rest unchanged
    async fn update_fields(&self, id: TaskId, patch: TaskPatch) -> Result<Task>;

    /// Remove a task. Returns `false` when the id does not exist.
    async fn remove(&self, id: TaskId) -> Result<bool>;

    /// Number of tasks currently in `status`
    async fn count_by_status(&self, status: &str) -> Result<usize>;

    /// Tasks in `status`, in insertion (ascending id) order, sliced by
    /// `offset` and `limit`
    async fn list_by_status(&self, status: &str, offset: usize, limit: usize)
        -> Result<Vec<Task>>;
}
