//! Task board ordering engine
//!
//! Columns and tasks carry fractional order keys ([`Ordinal`]), so a reorder
//! rewrites exactly one entity. On top of the keys sit a drag session that
//! previews a move while the pointer is over a target, a resolver that turns
//! (dragged item, drop target) into a [`BoardMove`], and a read-only
//! projection that groups and filters tasks for display.
//!
//! ## Overview
//!
//! - **One move, one write** - a drop persists the new ordinal (and column) of
//!   the dragged entity only
//! - **Preview from snapshot** - every hover is recomputed from the pre-drag
//!   board, so cancel is exact
//! - **Optimistic sync** - moves apply locally first and roll back if the backend refuses them
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard::{Board, BoardFilter, BoardStore, DragItem, DropTarget};
//!
//! let mut store = BoardStore::new(Board::with_default_columns("Demo"));
//!
//! // Drag "done" onto "todo": columns become done, todo, doing
//! store.pick_up(DragItem::Column("done".into()));
//! store.hover(Some(DropTarget::Column("todo".into())));
//! let mv = store.drop().expect("columns reordered");
//! store.confirm(&mv).unwrap();
//!
//! let view = store.view(&BoardFilter::new());
//! let order: Vec<_> = view.columns.iter().map(|c| c.column.id.as_str()).collect();
//! assert_eq!(order, ["done", "todo", "doing"]);
//! ```

pub mod backend;
pub mod drag;
mod error;
pub mod logging;
pub mod projection;
pub mod reorder;
mod store;
mod sync;
pub mod types;

pub use backend::{BoardBackend, FileBackend, FileLock, InMemoryBackend};
pub use drag::{DragItem, DragPhase, DragSession, DropTarget};
pub use error::{BoardError, Result};
pub use projection::{project, BoardFilter, BoardView, ColumnView};
pub use store::BoardStore;
pub use sync::BoardSync;

pub use types::{
    slugify, Board, BoardMove, Column, ColumnId, Label, LabelId, Ordinal, Task, TaskId,
    TaskImpact, TaskStatus, TaskType, User, UserId,
};
