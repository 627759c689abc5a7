//! Drag-and-drop session tracking.
//!
//! A [`DragSession`] follows one pointer or keyboard drag from pick-up to drop
//! or cancel. Payloads and targets are tagged variants rather than strings, so
//! a column can never be mistaken for a task.

mod session;

pub use session::{DragPhase, DragSession};

use crate::types::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// The entity being dragged
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DragItem {
    Column(ColumnId),
    Task(TaskId),
}

/// What the dragged entity is currently over
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    Column(ColumnId),
    Task(TaskId),
}

impl DragItem {
    /// The drop target that refers to the same entity
    pub fn as_target(&self) -> DropTarget {
        match self {
            Self::Column(id) => DropTarget::Column(id.clone()),
            Self::Task(id) => DropTarget::Task(id.clone()),
        }
    }
}
