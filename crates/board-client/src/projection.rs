//! Column projection
//!
//! Builds a full board snapshot by querying each configured column
//! independently. There is no incremental mode; callers re-run the
//! projection whenever they want a fresher board.

use tb_core::column::ColumnConfig;

use crate::api::BoardApi;
use crate::board::{BoardColumn, BoardEntry, BoardSnapshot, SyncState};
use crate::error::Result;

/// Per-column fetch ceiling applied when the caller does not choose one.
/// Large enough that a column is not truncated at expected data volumes.
pub const DEFAULT_COLUMN_LIMIT: i64 = 100;

/// Fetch one page per configured column and assemble the board.
///
/// Columns with no matching tasks come back as empty lists, not errors.
pub async fn fetch_board<A: BoardApi>(
    api: &A,
    columns: &ColumnConfig,
    column_limit: i64,
) -> Result<BoardSnapshot> {
    let mut snapshot = BoardSnapshot::default();
    for column in columns.iter() {
        let page = api
            .list_tasks(&column.key, Some(1), Some(column_limit))
            .await?;
        let entries = page
            .tasks
            .into_iter()
            .map(|task| BoardEntry {
                task,
                sync: SyncState::Settled,
            })
            .collect();
        snapshot.insert_column(
            &column.key,
            BoardColumn {
                name: column.name.clone(),
                entries,
            },
        );
    }
    Ok(snapshot)
}
