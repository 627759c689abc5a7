//! The data-fetch layer that boards are loaded from and moves persisted to.

mod file;
mod memory;

pub use file::{FileBackend, FileLock};
pub use memory::InMemoryBackend;

use crate::error::Result;
use crate::types::{Board, BoardMove, ColumnId, Ordinal, TaskId};
use async_trait::async_trait;

/// Source of truth for board state.
///
/// Mutations either succeed as a whole or return an error; on error the
/// caller rolls its optimistic state back.
#[async_trait]
pub trait BoardBackend: Send + Sync {
    /// Fetch the current board
    async fn fetch_board(&self) -> Result<Board>;

    /// Move `task` into `column` at `ordinal`
    async fn update_task_column(
        &self,
        task: &TaskId,
        column: &ColumnId,
        ordinal: &Ordinal,
    ) -> Result<()>;

    /// Give `column` a new ordinal
    async fn reorder_column(&self, column: &ColumnId, ordinal: &Ordinal) -> Result<()>;

    /// Send a committed move as the matching mutation
    async fn persist(&self, mv: &BoardMove) -> Result<()> {
        match mv {
            BoardMove::Column { id, ordinal } => self.reorder_column(id, ordinal).await,
            BoardMove::Task {
                id,
                column,
                ordinal,
            } => self.update_task_column(id, column, ordinal).await,
        }
    }
}
