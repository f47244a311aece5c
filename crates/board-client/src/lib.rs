//! Client library for the task board
//!
//! Talks to the board API, projects the configured columns into a local
//! snapshot, and reconciles optimistic drag mutations with the server.

pub mod api;
pub mod board;
pub mod error;
pub mod http;
pub mod projection;

pub use api::BoardApi;
pub use board::{
    BoardColumn, BoardEntry, BoardReconciler, BoardSnapshot, DragEvent, DragLocation,
    FailurePolicy, MoveOutcome, SyncState,
};
pub use error::{ClientError, Result};
pub use http::HttpBoardApi;
pub use projection::{fetch_board, DEFAULT_COLUMN_LIMIT};
