//! CLI definition for the taskboard command-line interface.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use taskboard::{TaskImpact, TaskStatus, TaskType};

/// Taskboard - ordered columns and tasks in a single YAML file.
///
/// Settings come from taskboard.yaml, taskboard.toml or taskboard.json in the
/// working directory and from TASKBOARD_* environment variables; flags win.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Ordered task board in a YAML file")]
#[command(
    long_about = "Manage a task board stored as YAML. Columns and tasks carry fractional \
    order keys, so every move rewrites a single entry.\n\n\
    Environment variables:\n  \
    TASKBOARD_BOARD  Board file path (default board.yaml)\n  \
    TASKBOARD_LOG    Log filter (default warn)\n  \
    TASKBOARD_QUERY  Default search query for `show`"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Board file to operate on
    #[arg(long, global = true, value_name = "PATH")]
    pub board: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a board with the default To Do, Doing and Done columns
    Init {
        /// Board name
        #[arg(long, default_value = "Board")]
        name: String,
        /// Overwrite an existing board file
        #[arg(long)]
        force: bool,
    },

    /// Append a column
    AddColumn {
        /// Display name
        name: String,
        /// Column ID (defaults to a slug of the name)
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete an empty column
    RemoveColumn {
        /// Column ID
        column: String,
    },

    /// Add a task at the top of a column
    AddTask {
        /// Column ID
        column: String,
        /// One-line summary
        summary: String,
        /// Longer description
        #[arg(long)]
        markdown: Option<String>,
        /// feature, chore or bug
        #[arg(long = "type", value_parser = parse_type)]
        task_type: Option<TaskType>,
        /// Status 0-6 or its name
        #[arg(long, value_parser = parse_status)]
        status: Option<TaskStatus>,
        /// Impact 0-3
        #[arg(long, value_parser = parse_impact)]
        impact: Option<TaskImpact>,
        /// Label name (repeatable)
        #[arg(long = "label", value_name = "NAME")]
        labels: Vec<String>,
        /// Assignee name (repeatable)
        #[arg(long = "assignee", value_name = "NAME")]
        assignees: Vec<String>,
    },

    /// Move a task on to the next workflow status
    AdvanceTask {
        /// Task ID or slug
        task: String,
    },

    /// Print the board, optionally filtered
    Show {
        /// Case-insensitive search over summary, description and slug
        #[arg(long, short)]
        query: Option<String>,
        /// Only show tasks with this status (repeatable)
        #[arg(long = "status", value_parser = parse_status)]
        statuses: Vec<TaskStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drag a task onto another task or a column
    #[command(group(ArgGroup::new("target").required(true).args(["onto_task", "onto_column"])))]
    MoveTask {
        /// Task ID or slug
        task: String,
        /// Target task ID or slug
        #[arg(long)]
        onto_task: Option<String>,
        /// Target column ID
        #[arg(long)]
        onto_column: Option<String>,
    },

    /// Drag a column onto another column
    MoveColumn {
        /// Column ID
        column: String,
        /// Target column ID
        #[arg(long)]
        onto: String,
    },
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    if let Ok(number) = value.parse::<u8>() {
        return TaskStatus::try_from(number).map_err(|e| e.to_string());
    }
    TaskStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown status '{value}'"))
}

fn parse_impact(value: &str) -> Result<TaskImpact, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("impact must be a number 0-3, got '{value}'"))?;
    TaskImpact::try_from(number).map_err(|e| e.to_string())
}

fn parse_type(value: &str) -> Result<TaskType, String> {
    value.parse().map_err(|e: taskboard::BoardError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_status_by_number_or_name() {
        assert_eq!(parse_status("2").unwrap(), TaskStatus::Started);
        assert_eq!(parse_status("Accepted").unwrap(), TaskStatus::Accepted);
        assert!(parse_status("7").is_err());
        assert!(parse_status("later").is_err());
    }

    #[test]
    fn test_move_task_requires_a_target() {
        assert!(Cli::try_parse_from(["taskboard", "move-task", "t1"]).is_err());
        assert!(Cli::try_parse_from([
            "taskboard",
            "move-task",
            "t1",
            "--onto-task",
            "t2",
            "--onto-column",
            "done"
        ])
        .is_err());
        let cli = Cli::try_parse_from(["taskboard", "move-task", "t1", "--onto-column", "done"])
            .unwrap();
        assert!(matches!(cli.command, Commands::MoveTask { onto_column: Some(_), .. }));
    }

    #[test]
    fn test_add_task_repeats_labels_and_assignees() {
        let cli = Cli::try_parse_from([
            "taskboard",
            "add-task",
            "todo",
            "Fix login",
            "--label",
            "bug",
            "--label",
            "auth",
            "--assignee",
            "Ada",
        ])
        .unwrap();
        let Commands::AddTask {
            labels, assignees, ..
        } = cli.command
        else {
            panic!("expected add-task");
        };
        assert_eq!(labels, vec!["bug", "auth"]);
        assert_eq!(assignees, vec!["Ada"]);
    }

    #[test]
    fn test_show_collects_statuses() {
        let cli = Cli::try_parse_from(["taskboard", "show", "--status", "0", "--status", "iced"])
            .unwrap();
        let Commands::Show { statuses, .. } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(statuses, vec![TaskStatus::Iced, TaskStatus::Iced]);
    }
}
