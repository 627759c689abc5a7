//! Optimistic persistence: drive a [`BoardStore`] from a [`BoardBackend`].

use crate::backend::BoardBackend;
use crate::error::{BoardError, Result};
use crate::logging::Pretty;
use crate::store::BoardStore;
use crate::types::BoardMove;
use tracing::{debug, warn};

/// A store paired with the backend its moves are persisted to.
///
/// A drop updates the working board at once; the mutation is then sent, and
/// the known-good board either advances or the working board rolls back.
pub struct BoardSync<B: BoardBackend> {
    backend: B,
    store: BoardStore,
}

impl<B: BoardBackend> BoardSync<B> {
    /// Fetch the board and start tracking it
    pub async fn load(backend: B) -> Result<Self> {
        let board = backend.fetch_board().await?;
        debug!(
            columns = board.columns().len(),
            tasks = board.tasks().len(),
            "board loaded"
        );
        Ok(Self {
            backend,
            store: BoardStore::new(board),
        })
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Drag transitions go through here
    pub fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Pull fresh data and reconcile, rebasing any active drag
    pub async fn refresh(&mut self) -> Result<()> {
        let fresh = self.backend.fetch_board().await?;
        self.store.reconcile(fresh);
        Ok(())
    }

    /// Send `mv`, which is already applied to the working board.
    ///
    /// On failure the working board is rolled back and the error is returned
    /// as `MutationRejected`.
    pub async fn persist(&mut self, mv: &BoardMove) -> Result<()> {
        debug!("persisting {}", Pretty(mv));
        match self.backend.persist(mv).await {
            Ok(()) => self.store.confirm(mv),
            Err(err) => {
                warn!(%err, "mutation failed; rolling back");
                self.store.rollback();
                Err(match err {
                    BoardError::MutationRejected { .. } => err,
                    other => BoardError::rejected(other.to_string()),
                })
            }
        }
    }

    /// Drop the active drag and persist the resulting move, if any
    pub async fn drop_and_persist(&mut self) -> Result<Option<BoardMove>> {
        let Some(mv) = self.store.drop() else {
            return Ok(None);
        };
        self.persist(&mv).await?;
        Ok(Some(mv))
    }
}
