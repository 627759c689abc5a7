//! Read-only projection of a board into display columns.

use crate::types::{Board, Column, Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Which tasks a view shows. An empty filter shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    /// Case-insensitive substring of summary, markdown or slug
    #[serde(default)]
    pub query: String,
    /// Statuses to keep; empty keeps all
    #[serde(default)]
    pub statuses: Vec<TaskStatus>,
}

impl BoardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.statuses.is_empty()
    }

    /// Whether `task` passes the filter
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_status(task)
            && (self.query.is_empty() || task.matches_query(&self.query.to_lowercase()))
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&task.status)
    }
}

/// Columns in order, each with its visible tasks in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView<'a> {
    pub name: &'a str,
    pub columns: Vec<ColumnView<'a>>,
}

/// One column of a [`BoardView`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView<'a> {
    #[serde(flatten)]
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

impl BoardView<'_> {
    /// Number of visible tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// Group the tasks of `board` that pass `filter` under their columns.
///
/// Every column is listed, even when none of its tasks match.
pub fn project<'a>(board: &'a Board, filter: &BoardFilter) -> BoardView<'a> {
    let needle = filter.query.to_lowercase();
    let columns = board
        .columns()
        .iter()
        .map(|column| ColumnView {
            column,
            tasks: board
                .tasks_in(&column.id)
                .filter(|t| filter.matches_status(t))
                .filter(|t| needle.is_empty() || t.matches_query(&needle))
                .collect(),
        })
        .collect();

    BoardView {
        name: board.name(),
        columns,
    }
}
