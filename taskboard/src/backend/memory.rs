use super::BoardBackend;
use crate::error::{BoardError, Result};
use crate::types::{Board, BoardMove, ColumnId, Ordinal, Task, TaskId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Backend holding the board in memory.
///
/// Mutations can be switched to fail, and tasks can be deleted behind a
/// client's back, which is what rollback and stale-target handling need.
#[derive(Debug)]
pub struct InMemoryBackend {
    board: RwLock<Board>,
    reject: AtomicBool,
}

impl InMemoryBackend {
    pub fn new(board: Board) -> Self {
        Self {
            board: RwLock::new(board),
            reject: AtomicBool::new(false),
        }
    }

    /// Make every following mutation fail (or succeed again)
    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Delete a task without telling any client
    pub async fn remove_task(&self, id: &TaskId) -> Result<Task> {
        self.board.write().await.remove_task(id)
    }

    /// Copy of the stored board
    pub async fn snapshot(&self) -> Board {
        self.board.read().await.clone()
    }

    async fn mutate(&self, mv: BoardMove) -> Result<()> {
        if self.reject.load(Ordering::SeqCst) {
            debug!(?mv, "rejecting mutation");
            return Err(BoardError::rejected("backend is rejecting mutations"));
        }
        self.board.write().await.apply(&mv)
    }
}

#[async_trait]
impl BoardBackend for InMemoryBackend {
    async fn fetch_board(&self) -> Result<Board> {
        Ok(self.snapshot().await)
    }

    async fn update_task_column(
        &self,
        task: &TaskId,
        column: &ColumnId,
        ordinal: &Ordinal,
    ) -> Result<()> {
        self.mutate(BoardMove::Task {
            id: task.clone(),
            column: column.clone(),
            ordinal: ordinal.clone(),
        })
        .await
    }

    async fn reorder_column(&self, column: &ColumnId, ordinal: &Ordinal) -> Result<()> {
        self.mutate(BoardMove::Column {
            id: column.clone(),
            ordinal: ordinal.clone(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mutations_apply() {
        let backend = InMemoryBackend::new(Board::with_default_columns("Test"));
        let done = ColumnId::from("done");
        let ordinal = Ordinal::before(&Ordinal::sequence(1)[0]);
        backend.reorder_column(&done, &ordinal).await.unwrap();

        let board = backend.fetch_board().await.unwrap();
        assert_eq!(board.columns()[0].id, done);
    }

    #[tokio::test]
    async fn test_reject_switch() {
        let backend = InMemoryBackend::new(Board::with_default_columns("Test"));
        let before = backend.snapshot().await;
        backend.set_reject(true);

        let err = backend
            .reorder_column(&"done".into(), &Ordinal::parse("1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::MutationRejected { .. }));
        assert_eq!(backend.snapshot().await, before);

        backend.set_reject(false);
        backend
            .reorder_column(&"done".into(), &Ordinal::parse("1").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_task_is_an_error() {
        let backend = InMemoryBackend::new(Board::with_default_columns("Test"));
        let err = backend
            .update_task_column(&"ghost".into(), &"todo".into(), &Ordinal::first())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
    }
}
