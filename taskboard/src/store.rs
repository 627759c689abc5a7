//! Single-writer board state: working board, known-good board and the drag session.

use crate::drag::{DragItem, DragSession, DropTarget};
use crate::error::Result;
use crate::projection::{project, BoardFilter, BoardView};
use crate::types::{Board, BoardMove};
use tracing::{debug, info};

/// Owns every piece of mutable board state.
///
/// `board` is what the user sees, live drag preview included. `confirmed` is
/// the last state the server agreed with. Only drag transitions and the
/// server-result handlers (`confirm`, `rollback`, `reconcile`) write here.
#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    confirmed: Board,
    session: DragSession,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self {
            confirmed: board.clone(),
            board,
            session: DragSession::new(),
        }
    }

    /// The working board, including any live preview
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The last server-confirmed board
    pub fn confirmed(&self) -> &Board {
        &self.confirmed
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Project the working board for display
    pub fn view(&self, filter: &BoardFilter) -> BoardView<'_> {
        project(&self.board, filter)
    }

    pub fn pick_up(&mut self, item: DragItem) -> bool {
        self.session.pick_up(&self.board, item)
    }

    pub fn hover(&mut self, target: Option<DropTarget>) {
        self.session.hover(&mut self.board, target);
    }

    /// Release the drag. The returned move is already applied to the working
    /// board and still needs confirming.
    pub fn drop(&mut self) -> Option<BoardMove> {
        self.session.drop(&mut self.board)
    }

    pub fn cancel(&mut self) {
        self.session.cancel(&mut self.board);
    }

    /// The UI element for `item` was removed
    pub fn source_unmounted(&mut self, item: &DragItem) {
        self.session.unmount(&mut self.board, item);
    }

    /// The server accepted `mv`
    pub fn confirm(&mut self, mv: &BoardMove) -> Result<()> {
        self.confirmed.apply(mv)?;
        debug!(?mv, "move confirmed");
        Ok(())
    }

    /// The server rejected the pending move; show the known-good board again
    pub fn rollback(&mut self) {
        info!("rolling back to last confirmed board");
        let confirmed = self.confirmed.clone();
        self.session.rebase(&mut self.board, confirmed);
    }

    /// Fresh server data arrived
    pub fn reconcile(&mut self, fresh: Board) {
        debug!(
            columns = fresh.columns().len(),
            tasks = fresh.tasks().len(),
            "reconciling with fresh board"
        );
        self.confirmed = fresh.clone();
        self.session.rebase(&mut self.board, fresh);
    }
}
