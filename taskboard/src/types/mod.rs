//! Core types for the task board engine

mod board;
mod ids;
mod position;
mod task;

// Re-export all types
pub use board::{Board, BoardMove, Column};
pub use ids::{ColumnId, LabelId, TaskId, UserId};
pub use position::Ordinal;
pub use task::{slugify, Label, Task, TaskImpact, TaskStatus, TaskType, User};
