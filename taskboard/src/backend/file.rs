use super::BoardBackend;
use crate::error::{BoardError, Result};
use crate::types::{Board, BoardMove, ColumnId, Ordinal, TaskId};
use async_trait::async_trait;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Backend storing the board as a single YAML file.
///
/// Every write goes through a temp file and a rename. Mutations hold an
/// exclusive lock on a sibling `.lock` file for their whole read-modify-write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend for an existing (or not yet created) board file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `board` to a new board file at `path`.
    ///
    /// Fails with `AlreadyExists` unless `force` is set.
    pub async fn init(path: impl Into<PathBuf>, board: &Board, force: bool) -> Result<Self> {
        let backend = Self::new(path);
        if backend.is_initialized() && !force {
            return Err(BoardError::AlreadyExists {
                path: backend.path.clone(),
            });
        }
        let _lock = backend.lock().await?;
        backend.write(board).await?;
        info!(path = %backend.path.display(), "initialized board");
        Ok(backend)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    pub fn is_initialized(&self) -> bool {
        self.path.exists()
    }

    /// Read and validate the board file
    pub async fn load(&self) -> Result<Board> {
        if !self.is_initialized() {
            return Err(BoardError::NotInitialized {
                path: self.path.clone(),
            });
        }
        let content = fs::read_to_string(&self.path).await?;
        let board: Board = serde_yaml_ng::from_str(&content)?;
        Ok(board)
    }

    /// Replace the board file with `board`
    pub async fn save(&self, board: &Board) -> Result<()> {
        let _lock = self.lock().await?;
        self.write(board).await
    }

    /// Run `edit` against the stored board and write the result back, all
    /// under the lock
    pub async fn update<F>(&self, edit: F) -> Result<Board>
    where
        F: FnOnce(&mut Board) -> Result<()> + Send,
    {
        let _lock = self.lock().await?;
        let mut board = self.load().await?;
        edit(&mut board)?;
        self.write(&board).await?;
        Ok(board)
    }

    /// Take the exclusive lock without waiting
    pub async fn lock(&self) -> Result<FileLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => Ok(FileLock { file }),
            Err(_) => Err(BoardError::LockBusy),
        }
    }

    async fn write(&self, board: &Board) -> Result<()> {
        let content = serde_yaml_ng::to_string(board)?;
        atomic_write(&self.path, content.as_bytes()).await?;
        debug!(path = %self.path.display(), "board written");
        Ok(())
    }

    async fn mutate(&self, mv: BoardMove) -> Result<()> {
        self.update(|board| board.apply(&mv)).await.map(|_| ())
    }
}

/// RAII lock guard - releases on drop
#[derive(Debug)]
pub struct FileLock {
    file: std::fs::File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}

#[async_trait]
impl BoardBackend for FileBackend {
    async fn fetch_board(&self) -> Result<Board> {
        self.load().await
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
