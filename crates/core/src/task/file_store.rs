//! File-backed task storage
//!
//! Stores tasks as JSON in a file on disk, with an in-memory cache. The id
//! allocator's high-water mark is persisted alongside the tasks so ids are
//! never reused across restarts.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::model::{Task, TaskId, TaskPatch};
use super::store::TaskStore;
use crate::column::ColumnConfig;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksFile {
    next_id: TaskId,
    tasks: Vec<Task>,
}

impl Default for TasksFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    columns: ColumnConfig,
    /// In-memory cache of the file contents
    state: RwLock<TasksFile>,
}

impl FileTaskStore {
    /// Open a store at `path`, creating the file on first write.
    pub async fn new(path: impl Into<PathBuf>, columns: ColumnConfig) -> Result<Self> {
        let path = path.into();
        let mut state = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<TasksFile>(&content)?
        } else {
            TasksFile::default()
        };

        // Guard the never-reused invariant against a hand-edited file.
        let max_id = state.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        state.next_id = state.next_id.max(max_id + 1);

        Ok(Self {
            path,
            columns,
            state: RwLock::new(state),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let state = self.state.read().await;
        let content = serde_json::to_string_pretty(&*state)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn insert(&self, text: &str) -> Result<Task> {
        let task = {
            let mut state = self.state.write().await;
            let task = Task {
                id: state.next_id,
                text: text.to_string(),
                status: self.columns.entry_key().to_string(),
            };
            state.next_id += 1;
            state.tasks.push(task.clone());
            task
        };
        self.persist().await?;
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

        let task = {
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
            task.clone()
        };
        self.persist().await?;
        Ok(task)
    }

    async fn remove(&self, id: TaskId) -> Result<bool> {
        let removed = {
            let mut state = self.state.write().await;
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            state.tasks.len() != before
        };
        if removed {
            self.persist().await?;
        }
        Ok(removed)
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let store = FileTaskStore::new(&path, ColumnConfig::default())
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (store, _temp) = create_test_store().await;

        let task = store.insert("Test task").await.unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, "pending");

        let retrieved = store.get(task.id).await.unwrap();
        assert_eq!(retrieved, Some(task));
        assert!(store.get(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_fields() {
        let (store, _temp) = create_test_store().await;
        let task = store.insert("Original").await.unwrap();

        let updated = store
            .update_fields(task.id, TaskPatch::new().with_status("inProgress"))
            .await
            .unwrap();
        assert_eq!(updated.status, "inProgress");
        assert_eq!(updated.text, "Original");

        let result = store
            .update_fields(999, TaskPatch::new().with_text("Nope"))
            .await;
        assert!(matches!(result, Err(Error::TaskNotFound(999))));
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, _temp) = create_test_store().await;
        let task = store.insert("Task to delete").await.unwrap();

        assert!(store.remove(task.id).await.unwrap());
        assert!(store.get(task.id).await.unwrap().is_none());
        assert!(!store.remove(task.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_status_pagination() {
        let (store, _temp) = create_test_store().await;
        for i in 1..=7 {
            store.insert(&format!("Task {i}")).await.unwrap();
        }

        assert_eq!(store.count_by_status("pending").await.unwrap(), 7);
        let page = store.list_by_status("pending", 5, 5).await.unwrap();
        assert_eq!(page.iter().map(|t| t.id).collect::<Vec<_>>(), [6, 7]);
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let task_id;
        {
            let store = FileTaskStore::new(&path, ColumnConfig::default())
                .await
                .unwrap();
            let task = store.insert("Persistent task").await.unwrap();
            task_id = task.id;
            store
                .update_fields(task_id, TaskPatch::new().with_status("inProgress"))
                .await
                .unwrap();
        }

        {
            let store = FileTaskStore::new(&path, ColumnConfig::default())
                .await
                .unwrap();
            let task = store.get(task_id).await.unwrap().unwrap();
            assert_eq!(task.text, "Persistent task");
            assert_eq!(task.status, "inProgress");
        }
    }

    #[tokio::test]
    async fn test_ids_not_reused_across_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        {
            let store = FileTaskStore::new(&path, ColumnConfig::default())
                .await
                .unwrap();
            store.insert("First").await.unwrap();
            let second = store.insert("Second").await.unwrap();
            store.remove(second.id).await.unwrap();
        }

        {
            let store = FileTaskStore::new(&path, ColumnConfig::default())
                .await
                .unwrap();
            let third = store.insert("Third").await.unwrap();
            assert_eq!(third.id, 3);
        }
    }
}
