//! Taskboard CLI - ordered task board in a YAML file.
//!
//! Commands:
//! - `taskboard init`: Create a board with the default columns
//! - `taskboard add-column <name>`: Append a column
//! - `taskboard remove-column <column>`: Delete an empty column
//! - `taskboard add-task <column> <summary>`: Add a task at the top of a column
//! - `taskboard advance-task <task>`: Move a task to its next status
//! - `taskboard show`: Print the board, optionally filtered
//! - `taskboard move-task <task> --onto-task|--onto-column`: Drag a task
//! - `taskboard move-column <column> --onto <column>`: Drag a column
//!
//! Environment variables:
//! - TASKBOARD_BOARD: Board file path
//! - TASKBOARD_LOG: Log filter
//! - TASKBOARD_QUERY: Default search query for `show`
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use taskboard::BoardFilter;
use taskboard_cli::commands::{self, NewTask, TaskDestination};
use taskboard_cli::{Cli, Commands, Settings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {}", e);
            std::process::exit(1);
        }
    };

    let settings = match Settings::load(&cwd) {
        Ok(settings) => settings.with_board(cli.board.clone()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("taskboard=debug,taskboard_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(cli.command, &settings, &cwd).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(command: Commands, settings: &Settings, cwd: &Path) -> anyhow::Result<String> {
    let path = settings.board_path(cwd);

    match command {
        Commands::Init { name, force } => commands::init(&path, &name, force).await,

        Commands::AddColumn { name, id } => commands::add_column(&path, &name, id).await,

        Commands::RemoveColumn { column } => commands::remove_column(&path, &column).await,

        Commands::AddTask {
            column,
            summary,
            markdown,
            task_type,
            status,
            impact,
            labels,
            assignees,
        } => {
            let new = NewTask {
                summary,
                markdown,
                task_type,
                status,
                impact,
                labels,
                assignees,
            };
            commands::add_task(&path, &column, new).await
        }

        Commands::AdvanceTask { task } => commands::advance_task(&path, &task).await,

        Commands::Show {
            query,
            statuses,
            json,
        } => {
            let filter = BoardFilter::new()
                .with_query(query.unwrap_or_else(|| settings.query.clone()))
                .with_statuses(statuses);
            commands::show(&path, &filter, json).await
        }

        Commands::MoveTask {
            task,
            onto_task,
            onto_column,
        } => {
            let destination = match (onto_task, onto_column) {
                (Some(target), _) => TaskDestination::Task(target),
                (None, Some(column)) => TaskDestination::Column(column),
                (None, None) => anyhow::bail!("move-task needs --onto-task or --onto-column"),
            };
            commands::move_task(&path, &task, destination).await
        }

        Commands::MoveColumn { column, onto } => {
            commands::move_column(&path, &column, &onto).await
        }
    }
}
