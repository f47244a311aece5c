//! In-memory task storage
//!
//! Keeps tasks in a plain vector behind an async lock, with an encapsulated
//! id allocator. Every instance is fully independent, so tests and embedded
//! deployments can run any number of stores side by side.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::model::{Task, TaskId, TaskPatch};
use super::store::TaskStore;
use crate::column::ColumnConfig;
use crate::{Error, Result};

/// In-memory task store
pub struct MemoryTaskStore {
    columns: ColumnConfig,
    state: RwLock<MemoryState>,
}

struct MemoryState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl MemoryTaskStore {
    /// Create an empty store validating against `columns`
    pub fn new(columns: ColumnConfig) -> Self {
        Self {
            columns,
            state: RwLock::new(MemoryState {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, text: &str) -> Result<Task> {
        let mut state = self.state.write().await;
        let task = Task {
            id: state.next_id,
            text: text.to_string(),
            status: self.columns.entry_key().to_string(),
        };
        state.next_id += 1;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn update_fields(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        // Defense in depth: the mutation service has already validated this.
        if let Some(status) = &patch.status {
            if !self.columns.contains(status) {
                return Err(Error::InvalidStatus(status.clone()));
            }
        }

        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))?;

        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(text) = patch.text {
            task.text = text;
        }
        Ok(task.clone())
    }

    async fn remove(&self, id: TaskId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        Ok(state.tasks.len() != before)
    }

    async fn count_by_status(&self, status: &str) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.tasks.iter().filter(|t| t.status == status).count())
    }

    async fn list_by_status(
        &self,
        status: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.status == status)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
