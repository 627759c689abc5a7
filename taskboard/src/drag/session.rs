//! The drag session state machine

use super::{DragItem, DropTarget};
use crate::logging::Pretty;
use crate::reorder;
use crate::types::{Board, BoardMove, ColumnId, TaskId};
use tracing::{debug, trace, warn};

/// Where a drag session currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    DraggingColumn {
        column: ColumnId,
    },
    DraggingTask {
        task: TaskId,
        /// Column the task was picked up from
        origin: ColumnId,
    },
}

impl DragPhase {
    /// The entity being dragged, if any
    pub fn item(&self) -> Option<DragItem> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { column } => Some(DragItem::Column(column.clone())),
            Self::DraggingTask { task, .. } => Some(DragItem::Task(task.clone())),
        }
    }
}

/// One drag at a time, from pick-up to drop or cancel.
///
/// The session owns the pre-drag snapshot of the board. Every hover rebuilds
/// the live preview from that snapshot plus a single resolved move, so hovers
/// never accumulate and cancel restores the snapshot exactly. The board itself
/// is owned by the caller and passed in to each transition.
///
/// Transitions never fail: anything unexpected is logged and degrades to a
/// no-op.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
    over: Option<DropTarget>,
    snapshot: Option<Board>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// The entity being dragged, if any
    pub fn dragged(&self) -> Option<DragItem> {
        self.phase.item()
    }

    /// The last target hovered during this session
    pub fn over(&self) -> Option<&DropTarget> {
        self.over.as_ref()
    }

    /// The pre-drag board, held while a session is active
    pub fn snapshot(&self) -> Option<&Board> {
        self.snapshot.as_ref()
    }

    /// Start dragging `item`. Refused when a session is already active or the
    /// entity does not exist.
    pub fn pick_up(&mut self, board: &Board, item: DragItem) -> bool {
        if let Some(current) = self.dragged() {
            warn!(?current, requested = ?item, "drag already in progress; pick-up refused");
            return false;
        }

        let phase = match &item {
            DragItem::Column(id) if board.column(id).is_some() => {
                DragPhase::DraggingColumn { column: id.clone() }
            }
            DragItem::Task(id) => match board.task(id) {
                Some(task) => DragPhase::DraggingTask {
                    task: id.clone(),
                    origin: task.column.clone(),
                },
                None => {
                    warn!(task = %id, "pick-up of unknown task refused");
                    return false;
                }
            },
            DragItem::Column(id) => {
                warn!(column = %id, "pick-up of unknown column refused");
                return false;
            }
        };

        debug!(?phase, "drag started");
        self.phase = phase;
        self.over = None;
        self.snapshot = Some(board.clone());
        true
    }

    /// Move over `target` (or over nothing). Only the live preview changes.
    pub fn hover(&mut self, board: &mut Board, target: Option<DropTarget>) {
        let Some(item) = self.dragged() else {
            trace!(?target, "hover while idle ignored");
            return;
        };
        if self.over == target {
            return;
        }
        if let Some(snapshot) = &self.snapshot {
            let (preview, mv) = settle(snapshot, &item, target.as_ref());
            trace!(?target, ?mv, "preview updated");
            *board = preview;
        }
        self.over = target;
    }

    /// Release over the last hovered target. Returns the committed move, or
    /// `None` when the drop changes nothing (self-drop, stale target, no target).
    pub fn drop(&mut self, board: &mut Board) -> Option<BoardMove> {
        let item = self.dragged()?;
        let target = self.over.take();
        self.phase = DragPhase::Idle;
        let snapshot = self.snapshot.take()?;

        let (committed, mv) = settle(&snapshot, &item, target.as_ref());
        *board = committed;
        match &mv {
            Some(mv) => debug!("drop committed {}", Pretty(mv)),
            None => debug!(?item, ?target, "drop changed nothing"),
        }
        mv
    }

    /// Abandon the drag and restore the pre-drag board
    pub fn cancel(&mut self, board: &mut Board) {
        if let Some(snapshot) = self.snapshot.take() {
            debug!(item = ?self.dragged(), "drag cancelled");
            *board = snapshot;
        }
        self.phase = DragPhase::Idle;
        self.over = None;
    }

    /// The UI element for `item` went away. Cancels when it is the dragged
    /// entity or, for a task drag, its origin column.
    pub fn unmount(&mut self, board: &mut Board, item: &DragItem) {
        let affected = match (&self.phase, item) {
            (DragPhase::DraggingColumn { column }, DragItem::Column(id)) => column == id,
            (DragPhase::DraggingTask { task, .. }, DragItem::Task(id)) => task == id,
            (DragPhase::DraggingTask { origin, .. }, DragItem::Column(id)) => origin == id,
            _ => false,
        };
        if affected {
            debug!(?item, "drag source unmounted");
            self.cancel(board);
        }
    }

    /// Fresh data replaced the board mid-drag. The snapshot becomes `fresh`
    /// and the preview is recomputed against it; if the dragged entity is gone
    /// the session ends.
    pub fn rebase(&mut self, board: &mut Board, fresh: Board) {
        let Some(item) = self.dragged() else {
            *board = fresh;
            return;
        };

        let origin = match &item {
            DragItem::Column(id) => fresh.column(id).map(|_| None),
            DragItem::Task(id) => fresh.task(id).map(|t| Some(t.column.clone())),
        };
        let Some(origin) = origin else {
            debug!(?item, "dragged entity vanished from fresh data; ending drag");
            self.phase = DragPhase::Idle;
            self.over = None;
            self.snapshot = None;
            *board = fresh;
            return;
        };

        if let (DragPhase::DraggingTask { origin: current, .. }, Some(origin)) =
            (&mut self.phase, origin)
        {
            *current = origin;
        }
        let (preview, _) = settle(&fresh, &item, self.over.as_ref());
        *board = preview;
        self.snapshot = Some(fresh);
    }
}

/// `snapshot` with the move for (`item`, `target`) applied, plus that move
fn settle(
    snapshot: &Board,
    item: &DragItem,
    target: Option<&DropTarget>,
) -> (Board, Option<BoardMove>) {
    let mut board = snapshot.clone();
    let Some(target) = target else {
        return (board, None);
    };

    let mv = match reorder::resolve(snapshot, item, target) {
        Ok(mv) => mv,
        Err(err) => {
            warn!(%err, ?item, ?target, "could not place dragged entity");
            None
        }
    };
    let Some(mv) = mv else {
        return (board, None);
    };

    // apply validates before mutating, so a failure leaves the clone intact
    match board.apply(&mv) {
        Ok(()) => (board, Some(mv)),
        Err(err) => {
            warn!(%err, "resolved move did not apply");
            (board, None)
        }
    }
}
