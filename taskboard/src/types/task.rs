//! Task types: Task, TaskStatus, TaskImpact, TaskType, User, Label

use super::ids::{ColumnId, LabelId, TaskId, UserId};
use super::position::Ordinal;
use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task, serialized as its number (0-6)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    Iced = 0,
    #[default]
    Unstarted = 1,
    Started = 2,
    Finished = 3,
    Delivered = 4,
    Reviewed = 5,
    Accepted = 6,
}

impl TaskStatus {
    /// All statuses in workflow order
    pub const ALL: [TaskStatus; 7] = [
        Self::Iced,
        Self::Unstarted,
        Self::Started,
        Self::Finished,
        Self::Delivered,
        Self::Reviewed,
        Self::Accepted,
    ];

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iced => "iced",
            Self::Unstarted => "unstarted",
            Self::Started => "started",
            Self::Finished => "finished",
            Self::Delivered => "delivered",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
        }
    }

    /// The status the task moves to when its workflow action is taken.
    /// `Accepted` is terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Accepted => None,
            other => Self::try_from(other as u8 + 1).ok(),
        }
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| BoardError::invalid_value("status", format!("{value} is not in 0-6")))
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        status as u8
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much a task matters, serialized as its number (0-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskImpact {
    Na = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TryFrom<u8> for TaskImpact {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Na),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(BoardError::invalid_value(
                "impact",
                format!("{other} is not in 0-3"),
            )),
        }
    }
}

impl From<TaskImpact> for u8 {
    fn from(impact: TaskImpact) -> Self {
        impact as u8
    }
}

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Feature,
    Chore,
    Bug,
}

impl std::str::FromStr for TaskType {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feature" => Ok(Self::Feature),
            "chore" => Ok(Self::Chore),
            "bug" => Ok(Self::Bug),
            other => Err(BoardError::invalid_value(
                "type",
                format!("'{other}' is not one of feature, chore, bug"),
            )),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Feature => "feature",
            Self::Chore => "chore",
            Self::Bug => "bug",
        })
    }
}

/// A person that can be assigned to tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl User {
    /// A user identified by the slug of their name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: UserId::from(slugify(&name)),
            name,
            thumbnail_url: None,
        }
    }
}

/// A label attached to tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Label {
    /// A label identified by the slug of its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: LabelId::from(slugify(&name)),
            name,
            color: None,
        }
    }
}

/// A task card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub slug: String,
    pub summary: String,
    #[serde(default)]
    pub markdown: String,

    /// Owning column
    pub column: ColumnId,
    /// Order among the tasks of `column`
    pub ordinal: Ordinal,

    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<TaskImpact>,
    #[serde(default, rename = "type")]
    pub task_type: TaskType,

    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub labels: Vec<Label>,

    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in `column` at `ordinal`, with a slug derived from the summary
    pub fn new(summary: impl Into<String>, column: impl Into<ColumnId>, ordinal: Ordinal) -> Self {
        let summary = summary.into();
        Self {
            id: TaskId::new(),
            slug: slugify(&summary),
            summary,
            markdown: String::new(),
            column: column.into(),
            ordinal,
            status: TaskStatus::default(),
            impact: None,
            task_type: TaskType::default(),
            assignees: Vec::new(),
            labels: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the ID
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the markdown body
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = markdown.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the impact
    pub fn with_impact(mut self, impact: Option<TaskImpact>) -> Self {
        self.impact = impact;
        self
    }

    /// Set the task type
    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Set assignees
    pub fn with_assignees(mut self, assignees: Vec<User>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Set labels
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    /// Case-insensitive substring match on summary, markdown and slug.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        [&self.summary, &self.markdown, &self.slug]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Lowercase, dash-separated slug of `text`
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
