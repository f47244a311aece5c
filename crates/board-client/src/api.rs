//! Board API abstraction
//!
//! The reconciler talks to the server through this trait so it can run
//! against the HTTP client or an in-process double interchangeably.

use std::sync::Arc;

use async_trait::async_trait;

use tb_core::query::TaskPage;
use tb_core::task::{Task, TaskId, TaskPatch};

use crate::error::Result;

/// Operations the board needs from the task server
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// One page of tasks for a status column
    async fn list_tasks(
        &self,
        status: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<TaskPage>;

    /// Create a task in the entry column
    async fn create_task(&self, text: &str) -> Result<Task>;

    /// Update a task's status and/or text
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task>;

    /// Delete a task
    async fn delete_task(&self, id: TaskId) -> Result<()>;
}

#[async_trait]
impl<T: BoardApi + ?Sized> BoardApi for Arc<T> {
    async fn list_tasks(
        &self,
        status: &str,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<TaskPage> {
        (**self).list_tasks(status, page, limit).await
    }

    async fn create_task(&self, text: &str) -> Result<Task> {
        (**self).create_task(text).await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        (**self).update_task(id, patch).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        (**self).delete_task(id).await
    }
}
