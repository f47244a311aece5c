//! Client-side board state
//!
//! Holds the per-column task lists the user is looking at, applies drag
//! gestures optimistically, and keeps each entry's synchronization state
//! with the server explicit.

use std::collections::HashMap;

use tb_core::column::ColumnConfig;
use tb_core::task::{Task, TaskId, TaskPatch};

use crate::api::BoardApi;
use crate::error::Result;
use crate::projection::{fetch_board, DEFAULT_COLUMN_LIMIT};

/// Synchronization state of one board entry relative to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Local view matches the last-known server state
    Settled,
    /// Optimistically moved; the persisting update has not resolved yet
    Pending,
    /// The persisting update failed; the local position is ahead of the
    /// server
    Failed,
}

/// A task plus its synchronization state
#[derive(Debug, Clone)]
pub struct BoardEntry {
    pub task: Task,
    pub sync: SyncState,
}

/// One column of the snapshot
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub name: String,
    pub entries: Vec<BoardEntry>,
}

/// Client-held, ephemeral view of the whole board, keyed by column.
///
/// Rebuilt wholesale by [`BoardReconciler::load`] and mutated in place by
/// drag operations. Column order is not kept here; render in the order the
/// [`ColumnConfig`] gives.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    columns: HashMap<String, BoardColumn>,
}

impl BoardSnapshot {
    pub(crate) fn insert_column(&mut self, key: impl Into<String>, column: BoardColumn) {
        self.columns.insert(key.into(), column);
    }

    /// Look up one column
    pub fn column(&self, key: &str) -> Option<&BoardColumn> {
        self.columns.get(key)
    }

    /// Whether `key` is a column of this snapshot
    pub fn has_column(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True before the first load
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Tasks of one column, in board order
    pub fn tasks_in(&self, key: &str) -> Vec<&Task> {
        self.columns
            .get(key)
            .map(|c| c.entries.iter().map(|e| &e.task).collect())
            .unwrap_or_default()
    }

    /// Where a task currently sits: `(column key, index)`
    pub fn position_of(&self, id: TaskId) -> Option<(&str, usize)> {
        self.columns.iter().find_map(|(key, column)| {
            column
                .entries
                .iter()
                .position(|e| e.task.id == id)
                .map(|idx| (key.as_str(), idx))
        })
    }

    /// Synchronization state of a task, if it is on the board
    pub fn sync_of(&self, id: TaskId) -> Option<SyncState> {
        self.entry(id).map(|e| e.sync)
    }

    fn entry(&self, id: TaskId) -> Option<&BoardEntry> {
        self.columns
            .values()
            .find_map(|c| c.entries.iter().find(|e| e.task.id == id))
    }

    fn entry_mut(&mut self, id: TaskId) -> Option<&mut BoardEntry> {
        self.columns
            .values_mut()
            .find_map(|c| c.entries.iter_mut().find(|e| e.task.id == id))
    }

    fn take_at(&mut self, key: &str, index: usize) -> Option<BoardEntry> {
        let column = self.columns.get_mut(key)?;
        if index >= column.entries.len() {
            return None;
        }
        Some(column.entries.remove(index))
    }

    fn take_by_id(&mut self, id: TaskId) -> Option<BoardEntry> {
        for column in self.columns.values_mut() {
            if let Some(idx) = column.entries.iter().position(|e| e.task.id == id) {
                return Some(column.entries.remove(idx));
            }
        }
        None
    }

    fn insert_at(&mut self, key: &str, index: usize, entry: BoardEntry) {
        if let Some(column) = self.columns.get_mut(key) {
            let index = index.min(column.entries.len());
            column.entries.insert(index, entry);
        }
    }
}

/// Where a drag started or ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    pub column: String,
    pub index: usize,
}

/// A completed drag gesture as reported by the drag layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    pub task_id: TaskId,
    pub source: DragLocation,
    /// `None` when the card was dropped outside any column
    pub destination: Option<DragLocation>,
}

/// What to do with the optimistic local move when the server rejects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep the local position and mark the entry [`SyncState::Failed`]
    #[default]
    KeepLocal,
    /// Splice the entry back where it came from
    Revert,
}

/// Result of applying a drag gesture to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed: no destination, or the gesture referenced a
    /// column or index that is not on the board
    Noop,
    /// Local reorder inside one column; nothing was persisted
    Reordered,
    /// Cross-column move applied locally and confirmed by the server
    Confirmed,
    /// Cross-column move applied locally but rejected by the server; the
    /// entry was spliced back when `reverted` is set
    Failed { reverted: bool },
}

/// Client-side reconciler: owns the snapshot and the drag state machine
pub struct BoardReconciler<A: BoardApi> {
    api: A,
    columns: ColumnConfig,
    column_limit: i64,
    failure_policy: FailurePolicy,
    snapshot: BoardSnapshot,
}

impl<A: BoardApi> BoardReconciler<A> {
    /// Create a reconciler over `api` with the compiled-in column pipeline
    pub fn new(api: A) -> Self {
        Self::with_columns(api, ColumnConfig::default())
    }

    /// Create a reconciler with an explicit column pipeline
    pub fn with_columns(api: A, columns: ColumnConfig) -> Self {
        Self {
            api,
            columns,
            column_limit: DEFAULT_COLUMN_LIMIT,
            failure_policy: FailurePolicy::default(),
            snapshot: BoardSnapshot::default(),
        }
    }

    /// Cap on tasks fetched per column on [`load`](Self::load)
    pub fn with_column_limit(mut self, limit: i64) -> Self {
        self.column_limit = limit;
        self
    }

    /// What happens to an optimistic move the server rejects
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// The current snapshot
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// The column pipeline this board renders
    pub fn columns(&self) -> &ColumnConfig {
        &self.columns
    }

    /// Replace the whole snapshot with a fresh server projection.
    ///
    /// Everything collapses back to [`SyncState::Settled`]; any local-only
    /// ordering is discarded.
    pub async fn load(&mut self) -> Result<()> {
        self.snapshot = fetch_board(&self.api, &self.columns, self.column_limit).await?;
        Ok(())
    }

    /// Apply a finished drag gesture.
    ///
    /// Dropping outside any column changes nothing. A drop in the source
    /// column is a purely local reorder. A drop in another column moves
    /// the entry locally first, then persists the status change.
    pub async fn apply_drag(&mut self, event: DragEvent) -> MoveOutcome {
        let Some(destination) = event.destination else {
            return MoveOutcome::Noop;
        };

        if destination.column == event.source.column {
            if self.move_within_column(&event.source.column, event.source.index, destination.index)
            {
                MoveOutcome::Reordered
            } else {
                MoveOutcome::Noop
            }
        } else {
            self.move_across_columns(
                &event.source.column,
                event.source.index,
                &destination.column,
                destination.index,
                event.task_id,
            )
            .await
        }
    }

    /// Reorder an entry inside one column.
    ///
    /// Local only: column order has no server-side representation, so the
    /// new order lasts until the next [`load`](Self::load).
    pub fn move_within_column(&mut self, column: &str, from: usize, to: usize) -> bool {
        let Some(entry) = self.snapshot.take_at(column, from) else {
            return false;
        };
        self.snapshot.insert_at(column, to, entry);
        true
    }

    /// Move an entry to another column: splice it locally right away, then
    /// issue the single status update that persists the move.
    pub async fn move_across_columns(
        &mut self,
        source: &str,
        from: usize,
        dest: &str,
        to: usize,
        task_id: TaskId,
    ) -> MoveOutcome {
        if !self.snapshot.has_column(dest) {
            return MoveOutcome::Noop;
        }
        let Some(mut entry) = self.snapshot.take_at(source, from) else {
            return MoveOutcome::Noop;
        };
        let original_status = entry.task.status.clone();

        // Optimistic: the entry is in its new column before the update is
        // even initiated.
        entry.task.status = dest.to_string();
        entry.sync = SyncState::Pending;
        self.snapshot.insert_at(dest, to, entry);

        match self
            .api
            .update_task(task_id, TaskPatch::new().with_status(dest))
            .await
        {
            Ok(task) => {
                if let Some(entry) = self.snapshot.entry_mut(task_id) {
                    entry.task = task;
                    entry.sync = SyncState::Settled;
                }
                MoveOutcome::Confirmed
            }
            Err(err) => {
                tracing::warn!(task_id, error = %err, "failed to persist cross-column move");
                match self.failure_policy {
                    FailurePolicy::KeepLocal => {
                        if let Some(entry) = self.snapshot.entry_mut(task_id) {
                            entry.sync = SyncState::Failed;
                        }
                        MoveOutcome::Failed { reverted: false }
                    }
                    FailurePolicy::Revert => {
                        if let Some(mut entry) = self.snapshot.take_by_id(task_id) {
                            entry.task.status = original_status;
                            entry.sync = SyncState::Settled;
                            self.snapshot.insert_at(source, from, entry);
                        }
                        MoveOutcome::Failed { reverted: true }
                    }
                }
            }
        }
    }

    /// Create a task and rebuild the snapshot.
    ///
    /// Creation changes column membership on the server, so a wholesale
    /// reload is simpler than patching the local view.
    pub async fn create_task(&mut self, text: &str) -> Result<Task> {
        let task = self.api.create_task(text).await?;
        self.load().await?;
        Ok(task)
    }

    /// Edit a task's text and rebuild the snapshot
    pub async fn edit_task_text(&mut self, id: TaskId, text: &str) -> Result<Task> {
        let task = self
            .api
            .update_task(id, TaskPatch::new().with_text(text))
            .await?;
        self.load().await?;
        Ok(task)
    }

    /// Delete a task and rebuild the snapshot
    pub async fn remove_task(&mut self, id: TaskId) -> Result<()> {
        self.api.delete_task(id).await?;
        self.load().await
    }
}
