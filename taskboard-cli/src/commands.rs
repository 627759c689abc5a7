//! Command implementations. Each returns the text to print on success.

use anyhow::{anyhow, bail, Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use taskboard::{
    project, slugify, Board, BoardError, BoardFilter, BoardMove, BoardSync, BoardView, Column,
    ColumnId, DragItem, DropTarget, FileBackend, Label, Task, TaskId, TaskImpact, TaskStatus,
    TaskType, User,
};
use tracing::info;

/// Options for `add-task`
#[derive(Debug, Default)]
pub struct NewTask {
    pub summary: String,
    pub markdown: Option<String>,
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub impact: Option<TaskImpact>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

/// Where `move-task` drops the task
#[derive(Debug, Clone)]
pub enum TaskDestination {
    Task(String),
    Column(String),
}

pub async fn init(path: &Path, name: &str, force: bool) -> Result<String> {
    FileBackend::init(path, &Board::with_default_columns(name), force)
        .await
        .with_context(|| format!("failed to initialize {}", path.display()))?;
    Ok(format!("Initialized board '{}' at {}", name, path.display()))
}

pub async fn add_column(path: &Path, name: &str, id: Option<String>) -> Result<String> {
    let id = ColumnId::from(id.unwrap_or_else(|| slugify(name)));
    if id.as_str().is_empty() {
        bail!("column name '{name}' does not produce a usable ID; pass --id");
    }
    FileBackend::new(path)
        .update(|board| {
            let ordinal = board.next_column_ordinal();
            board.add_column(Column::new(id.clone(), name, ordinal))
        })
        .await?;
    info!(column = %id, "column added");
    Ok(id.to_string())
}

pub async fn remove_column(path: &Path, column: &str) -> Result<String> {
    let id = ColumnId::from(column);
    FileBackend::new(path)
        .update(|board| board.remove_column(&id).map(|_| ()))
        .await?;
    info!(column = %id, "column removed");
    Ok(format!("Removed column {id}"))
}

/// Add a task above every existing task of `column`
pub async fn add_task(path: &Path, column: &str, new: NewTask) -> Result<String> {
    let column = ColumnId::from(column);
    let mut created = None;
    FileBackend::new(path)
        .update(|board| {
            let ordinal = board.first_task_ordinal(&column);
            let mut task = Task::new(new.summary, column.clone(), ordinal)
                .with_status(new.status.unwrap_or_default())
                .with_type(new.task_type.unwrap_or_default())
                .with_impact(new.impact)
                .with_labels(new.labels.into_iter().map(Label::new).collect())
                .with_assignees(new.assignees.into_iter().map(User::new).collect());
            if let Some(markdown) = new.markdown {
                task = task.with_markdown(markdown);
            }
            created = Some(task.id.clone());
            board.add_task(task)
        })
        .await?;
    let id = created.ok_or_else(|| anyhow!("task was not created"))?;
    info!(task = %id, column = %column, "task added");
    Ok(id.to_string())
}

/// Move a task on to the next status in the workflow
pub async fn advance_task(path: &Path, task: &str) -> Result<String> {
    let backend = FileBackend::new(path);
    let id = find_task(&backend.load().await?, task)?;

    let mut advanced = None;
    backend
        .update(|board| {
            let current = board
                .task(&id)
                .map(|t| t.status)
                .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })?;
            let next = current.next().ok_or_else(|| {
                BoardError::invalid_value("status", format!("task is already {current}"))
            })?;
            advanced = Some(next);
            board.set_task_status(&id, next)
        })
        .await?;
    let status = advanced.ok_or_else(|| anyhow!("status was not changed"))?;
    info!(task = %id, %status, "task advanced");
    Ok(format!("Task {id} is now {status}"))
}

pub async fn show(path: &Path, filter: &BoardFilter, json: bool) -> Result<String> {
    let board = FileBackend::new(path).load().await?;
    let view = project(&board, filter);
    if json {
        Ok(serde_json::to_string_pretty(&view)?)
    } else {
        Ok(render(&view))
    }
}

/// Plain-text rendering of a projection
pub fn render(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.name);
    for column in &view.columns {
        let _ = writeln!(
            out,
            "\n{} ({}) [{}]",
            column.column.name,
            column.column.id,
            column.tasks.len()
        );
        for task in &column.tasks {
            let _ = write!(
                out,
                "  - {} [{}, {}] {}",
                task.summary, task.status, task.task_type, task.slug
            );
            for label in &task.labels {
                let _ = write!(out, " #{}", label.name);
            }
            for user in &task.assignees {
                let _ = write!(out, " @{}", user.name);
            }
            out.push('\n');
        }
    }
    out
}

pub async fn move_task(path: &Path, task: &str, destination: TaskDestination) -> Result<String> {
    let mut sync = BoardSync::load(FileBackend::new(path)).await?;
    let board = sync.store().board();

    let item = DragItem::Task(find_task(board, task)?);
    let target = match destination {
        TaskDestination::Task(target) => DropTarget::Task(find_task(board, &target)?),
        TaskDestination::Column(column) => DropTarget::Column(find_column(board, &column)?),
    };

    drag(&mut sync, item, target).await
}

pub async fn move_column(path: &Path, column: &str, onto: &str) -> Result<String> {
    let mut sync = BoardSync::load(FileBackend::new(path)).await?;
    let board = sync.store().board();
    let item = DragItem::Column(find_column(board, column)?);
    let target = DropTarget::Column(find_column(board, onto)?);
    drag(&mut sync, item, target).await
}

/// Run one full pick-up, hover, drop session and persist the result
async fn drag(
    sync: &mut BoardSync<FileBackend>,
    item: DragItem,
    target: DropTarget,
) -> Result<String> {
    let store = sync.store_mut();
    if !store.pick_up(item.clone()) {
        bail!("cannot pick up {item:?}");
    }
    store.hover(Some(target));

    match sync.drop_and_persist().await? {
        Some(BoardMove::Column { id, .. }) => {
            let index = sync.store().board().column_index(&id).unwrap_or_default();
            Ok(format!("Moved column {id} to position {}", index + 1))
        }
        Some(BoardMove::Task { id, column, .. }) => {
            let index = sync
                .store()
                .board()
                .tasks_in(&column)
                .position(|t| t.id == id)
                .unwrap_or_default();
            Ok(format!("Moved task {id} to {column} position {}", index + 1))
        }
        None => Ok("Nothing to move".to_string()),
    }
}

/// Resolve a task by exact ID, then by slug. A slug shared by several tasks
/// is an error naming them all.
fn find_task(board: &Board, id_or_slug: &str) -> Result<TaskId> {
    let id = TaskId::from(id_or_slug);
    if board.task(&id).is_some() {
        return Ok(id);
    }

    let matches: Vec<&Task> = board.tasks_with_slug(id_or_slug).collect();
    match matches.as_slice() {
        [] => bail!("task not found: {id_or_slug}"),
        [task] => Ok(task.id.clone()),
        several => {
            let ids: Vec<&str> = several.iter().map(|t| t.id.as_str()).collect();
            bail!(
                "slug '{id_or_slug}' is ambiguous; use one of the task IDs: {}",
                ids.join(", ")
            )
        }
    }
}

fn find_column(board: &Board, id: &str) -> Result<ColumnId> {
    let id = ColumnId::from(id);
    board
        .column(&id)
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow!("column not found: {id}"))
}
