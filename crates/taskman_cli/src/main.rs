//! Command-line front end for the task store.
//!
//! # Responsibility
//! - Wire `taskman_core` against one database file.
//! - Render tagged operation results as text or JSON.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskman_core::{
    core_version, default_log_level, init_logging, AppContainer, OperationResult, TaskId,
    TaskListState,
};

#[derive(Debug, Parser)]
#[command(name = "taskman", about = "Manage tasks in a local database")]
struct Cli {
    /// Database file holding the tasks.
    #[arg(long, env = "TASKMAN_DB", default_value = "taskman.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files. Logging stays off without it.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all tasks.
    List,
    /// Show one task.
    Show { id: String },
    /// Create a task.
    Add {
        name: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change the name and/or notes of a task.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a task.
    Remove { id: String },
    /// Print the core version.
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir)
            .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    }

    let container = AppContainer::for_database(&cli.db);
    match cli.command {
        Command::List => list(&container, cli.json).await,
        Command::Show { id } => show(&container, TaskId::from(id), cli.json).await,
        Command::Add { name, notes } => add(&container, name, notes, cli.json).await,
        Command::Edit { id, name, notes } => {
            edit(&container, TaskId::from(id), name, notes, cli.json).await
        }
        Command::Remove { id } => remove(&container, TaskId::from(id)).await,
        Command::Version => {
            println!("taskman_core version={}", core_version());
            Ok(())
        }
    }
}

async fn list(container: &AppContainer, json: bool) -> Result<()> {
    match container.task_list().load().await {
        TaskListState::Tasks(rows) => {
            if json {
                let tasks: Vec<_> = rows
                    .iter()
                    .map(|row| {
                        serde_json::json!({
                            "id": row.id,
                            "name": row.title,
                            "notes": row.value,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for row in rows {
                    println!("{}\t{}\t{}", row.id, row.title, row.value);
                }
            }
            Ok(())
        }
        TaskListState::Empty { placeholder } => {
            if json {
                println!("[]");
            } else {
                println!("{placeholder}");
            }
            Ok(())
        }
        TaskListState::Failed(alert) => Err(alert.into()),
    }
}

async fn show(container: &AppContainer, id: TaskId, json: bool) -> Result<()> {
    let service = container.task_service();
    match container.converter().convert(service.get_task_by_id(&id)).await {
        OperationResult::Successful(Some(task)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("id:    {}\nname:  {}\nnotes: {}", task.id, task.name, task.notes);
            }
            Ok(())
        }
        OperationResult::Successful(None) => bail!("no task with id {id}"),
        OperationResult::Failed { message } => bail!("{message}"),
    }
}

async fn add(container: &AppContainer, name: String, notes: String, json: bool) -> Result<()> {
    let mut editor = container.task_editor();
    editor.set_name(name);
    editor.set_notes(notes);
    let task = editor.save().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

async fn edit(
    container: &AppContainer,
    id: TaskId,
    name: Option<String>,
    notes: Option<String>,
    json: bool,
) -> Result<()> {
    let service = container.task_service();
    let task = match container.converter().convert(service.get_task_by_id(&id)).await {
        OperationResult::Successful(Some(task)) => task,
        OperationResult::Successful(None) => bail!("no task with id {id}"),
        OperationResult::Failed { message } => bail!("{message}"),
    };

    let mut editor = container.task_editor_for(task);
    if let Some(name) = name {
        editor.set_name(name);
    }
    if let Some(notes) = notes {
        editor.set_notes(notes);
    }
    let task = editor.save().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    }
    Ok(())
}

async fn remove(container: &AppContainer, id: TaskId) -> Result<()> {
    container.task_list().remove(&id).await?;
    log::info!("event=task_removed module=cli status=ok");
    Ok(())
}
