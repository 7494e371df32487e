//! Task list commands for CLI.

use clap::Subcommand;
use pomotodo_core::{Config, TaskList};

use super::open_store;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
    },
    /// List tasks as JSON
    List {
        /// One line per task instead of JSON
        #[arg(long)]
        plain: bool,
    },
    /// Flip a task between open and done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: String,
    },
    /// Delete every completed task
    ClearCompleted,
}

pub fn run(action: TaskAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tasks = TaskList::new(open_store(config)?);

    match action {
        TaskAction::Add { text } => {
            let task = tasks.add(&text).ok_or("task text must not be blank")?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { plain } => {
            if plain {
                if tasks.list().is_empty() {
                    println!("No tasks yet.");
                }
                for task in tasks.list() {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {}  ({})", task.text, task.id);
                }
            } else {
                println!("{}", serde_json::to_string_pretty(tasks.list())?);
            }
        }
        TaskAction::Toggle { id } => {
            if !tasks.toggle(&id) {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task toggled: {id}");
        }
        TaskAction::Remove { id } => {
            if !tasks.remove(&id) {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task removed: {id}");
        }
        TaskAction::ClearCompleted => {
            let removed = tasks.clear_completed();
            println!("Removed {removed} completed task(s)");
        }
    }
    Ok(())
}
