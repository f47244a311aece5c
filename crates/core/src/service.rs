//! Task mutation service
//!
//! Validates and applies single-task mutations. This is the write side of
//! the board; the stores only re-check what is validated here.

use std::sync::Arc;

use crate::column::ColumnConfig;
use crate::task::{Task, TaskId, TaskPatch, TaskStore};
use crate::{Error, Result};

/// Validated create/update/delete operations on tasks
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    columns: ColumnConfig,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, columns: ColumnConfig) -> Self {
        Self { store, columns }
    }

    /// Create a task from `text`, trimmed, in the entry column.
    pub async fn create(&self, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }
        self.store.insert(text).await
    }

    /// Apply the provided fields of `patch` to the task `id`.
    ///
    /// An empty patch is a no-op that still returns the stored task.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        if let Some(status) = &patch.status {
            if !self.columns.contains(status) {
                return Err(Error::InvalidStatus(status.clone()));
            }
        }

        let text = match patch.text {
            Some(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(Error::EmptyText);
                }
                Some(text)
            }
            None => None,
        };
        let patch = TaskPatch {
            status: patch.status,
            text,
        };

        if patch.is_empty() {
            return self.store.get(id).await?.ok_or(Error::TaskNotFound(id));
        }
        self.store.update_fields(id, patch).await
    }

    /// Delete the task `id`.
    pub async fn delete(&self, id: TaskId) -> Result<()> {
        if self.store.remove(id).await? {
            Ok(())
        } else {
            Err(Error::TaskNotFound(id))
        }
    }
}
