//! Board-level types: Board, Column, BoardMove

use super::ids::{ColumnId, TaskId};
use super::position::Ordinal;
use super::task::{Task, TaskStatus};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A column (project) groups tasks; columns are ordered by their ordinal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub ordinal: Ordinal,
}

impl Column {
    /// Create a new column
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>, ordinal: Ordinal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ordinal,
        }
    }
}

/// A committed reordering: the entity, its new ordinal and, for tasks, its column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardMove {
    Column {
        id: ColumnId,
        ordinal: Ordinal,
    },
    Task {
        id: TaskId,
        column: ColumnId,
        ordinal: Ordinal,
    },
}

/// The flat column and task collections of one board.
///
/// Columns are kept sorted by ordinal and tasks by ordinal, so iterating the
/// tasks of one column yields them in display order. Construction and every
/// mutation enforce the board invariants: unique IDs, every task owned by an
/// existing column, and no two siblings sharing an ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    name: String,
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct BoardData {
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self> {
        Board::new(data.name, data.columns, data.tasks)
    }
}

impl Board {
    /// Build a board from raw collections, validating every invariant
    pub fn new(name: impl Into<String>, columns: Vec<Column>, tasks: Vec<Task>) -> Result<Self> {
        let mut column_ids = HashSet::new();
        let mut column_ordinals = HashSet::new();
        for column in &columns {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::duplicate_id("column", column.id.as_str()));
            }
            if !column_ordinals.insert(&column.ordinal) {
                return Err(BoardError::DuplicateOrdinal {
                    scope: "board".into(),
                    ordinal: column.ordinal.to_string(),
                });
            }
        }

        let mut task_ids = HashSet::new();
        let mut task_slots = HashSet::new();
        for task in &tasks {
            if !task_ids.insert(&task.id) {
                return Err(BoardError::duplicate_id("task", task.id.as_str()));
            }
            if !column_ids.contains(&task.column) {
                return Err(BoardError::OrphanTask {
                    task: task.id.to_string(),
                    column: task.column.to_string(),
                });
            }
            if !task_slots.insert((&task.column, &task.ordinal)) {
                return Err(BoardError::DuplicateOrdinal {
                    scope: format!("column {}", task.column),
                    ordinal: task.ordinal.to_string(),
                });
            }
        }

        let mut board = Self {
            name: name.into(),
            columns,
            tasks,
        };
        board.sort();
        Ok(board)
    }

    /// A board with no columns
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// A board with the default To Do / Doing / Done columns
    pub fn with_default_columns(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Self::default_columns(),
            tasks: Vec::new(),
        }
    }

    /// Get the default columns for a new board
    pub fn default_columns() -> Vec<Column> {
        let ordinals = Ordinal::sequence(3);
        vec![
            Column::new("todo", "To Do", ordinals[0].clone()),
            Column::new("doing", "Doing", ordinals[1].clone()),
            Column::new("done", "Done", ordinals[2].clone()),
        ]
    }

    fn sort(&mut self) {
        self.columns.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));
        self.tasks.sort_by(|a, b| {
            a.ordinal
                .cmp(&b.ordinal)
                .then_with(|| a.column.cmp(&b.column))
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All tasks, sorted by ordinal
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Display index of a column
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Tasks of one column in display order
    pub fn tasks_in<'a>(&'a self, column: &ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        let column = column.clone();
        self.tasks.iter().filter(move |t| t.column == column)
    }

    /// Tasks whose slug is `slug`. Slugs are not unique, so there may be several.
    pub fn tasks_with_slug<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.slug == slug)
    }

    /// Ordinal that places a new column last
    pub fn next_column_ordinal(&self) -> Ordinal {
        match self.columns.last() {
            Some(last) => Ordinal::after(&last.ordinal),
            None => Ordinal::first(),
        }
    }

    /// Ordinal that places a new task at the top of `column`
    pub fn first_task_ordinal(&self, column: &ColumnId) -> Ordinal {
        match self.tasks_in(column).next() {
            Some(first) => Ordinal::before(&first.ordinal),
            None => Ordinal::first(),
        }
    }

    /// Add a column
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.id).is_some() {
            return Err(BoardError::duplicate_id("column", column.id.as_str()));
        }
        self.ensure_column_ordinal_free(&column.ordinal, None)?;
        self.columns.push(column);
        self.sort();
        Ok(())
    }

    /// Add a task to an existing column
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.task(&task.id).is_some() {
            return Err(BoardError::duplicate_id("task", task.id.as_str()));
        }
        self.ensure_column_exists(&task.column)?;
        self.ensure_task_ordinal_free(&task.column, &task.ordinal, None)?;
        self.tasks.push(task);
        self.sort();
        Ok(())
    }

    /// Set the status of a task
    pub fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })?;
        task.status = status;
        Ok(())
    }

    /// Remove a task
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })?;
        Ok(self.tasks.remove(index))
    }

    /// Remove an empty column
    pub fn remove_column(&mut self, id: &ColumnId) -> Result<Column> {
        let index = self
            .column_index(id)
            .ok_or_else(|| BoardError::ColumnNotFound { id: id.to_string() })?;
        let count = self.tasks_in(id).count();
        if count > 0 {
            return Err(BoardError::ColumnNotEmpty {
                id: id.to_string(),
                count,
            });
        }
        Ok(self.columns.remove(index))
    }

    /// Apply a move. Validates first, so a failed move leaves the board untouched.
    pub fn apply(&mut self, mv: &BoardMove) -> Result<()> {
        match mv {
            BoardMove::Column { id, ordinal } => {
                self.ensure_column_exists(id)?;
                self.ensure_column_ordinal_free(ordinal, Some(id))?;
                if let Some(column) = self.columns.iter_mut().find(|c| &c.id == id) {
                    column.ordinal = ordinal.clone();
                }
            }
            BoardMove::Task {
                id,
                column,
                ordinal,
            } => {
                if self.task(id).is_none() {
                    return Err(BoardError::TaskNotFound { id: id.to_string() });
                }
                self.ensure_column_exists(column)?;
                self.ensure_task_ordinal_free(column, ordinal, Some(id))?;
                if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) {
                    task.column = column.clone();
                    task.ordinal = ordinal.clone();
                }
            }
        }
        self.sort();
        Ok(())
    }

    fn ensure_column_exists(&self, id: &ColumnId) -> Result<()> {
        match self.column(id) {
            Some(_) => Ok(()),
            None => Err(BoardError::ColumnNotFound { id: id.to_string() }),
        }
    }

    fn ensure_column_ordinal_free(
        &self,
        ordinal: &Ordinal,
        except: Option<&ColumnId>,
    ) -> Result<()> {
        let taken = self
            .columns
            .iter()
            .any(|c| &c.ordinal == ordinal && Some(&c.id) != except);
        if taken {
            return Err(BoardError::DuplicateOrdinal {
                scope: "board".into(),
                ordinal: ordinal.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_task_ordinal_free(
        &self,
        column: &ColumnId,
        ordinal: &Ordinal,
        except: Option<&TaskId>,
    ) -> Result<()> {
        let taken = self
            .tasks_in(column)
            .any(|t| &t.ordinal == ordinal && Some(&t.id) != except);
        if taken {
            return Err(BoardError::DuplicateOrdinal {
                scope: format!("column {column}"),
                ordinal: ordinal.to_string(),
            });
        }
        Ok(())
    }
}
