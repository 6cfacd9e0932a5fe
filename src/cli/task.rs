//! Task CLI commands
//!
//! Every command runs against the store loaded from `--input`. Commands
//! that change tasks print the resulting list, so JSON output can be fed
//! back in as the next input.

use std::convert::Infallible;

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{ItemId, SequentialIds, TaskFilter, TaskStatus, TaskStore};
use crate::loader::{Config, Loaded};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    List {
        /// Status view: all, pending or completed (anything else lists all;
        /// defaults to the configured filter)
        #[arg(long, value_name = "VIEW", value_parser = parse_filter)]
        filter: Option<TaskFilter>,
    },

    /// Show a single task
    Show {
        /// Task ID
        #[arg(allow_negative_numbers = true)]
        id: ItemId,
    },

    /// Add a task with the next free ID
    Add {
        /// Task name (blank uses the configured untitled name)
        name: Option<String>,

        /// Free-text details
        #[arg(long)]
        details: Option<String>,
    },

    /// Mark tasks as completed
    Complete {
        /// Task IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<ItemId>,
    },

    /// Mark tasks as cancelled
    Cancel {
        /// Task IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<ItemId>,
    },

    /// Move tasks back to pending
    Reopen {
        /// Task IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<ItemId>,
    },

    /// Flip tasks between completed and pending
    Toggle {
        /// Task IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<ItemId>,
    },

    /// Remove tasks
    Remove {
        /// Task IDs
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<ItemId>,
    },

    /// Show task counts by status
    Stats,
}

/// A change applied to tasks by ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Complete,
    Cancel,
    Reopen,
    Toggle,
    Remove,
}

impl Action {
    fn past_tense(&self) -> &'static str {
        match self {
            Action::Complete => "Completed",
            Action::Cancel => "Cancelled",
            Action::Reopen => "Reopened",
            Action::Toggle => "Toggled",
            Action::Remove => "Removed",
        }
    }

    /// Applies the action, returning false if no task had the ID
    fn apply(&self, store: &mut TaskStore, id: ItemId) -> bool {
        match self {
            Action::Complete => store.complete_task(id),
            Action::Cancel => store.set_status(id, TaskStatus::Cancelled),
            Action::Reopen => store.set_status(id, TaskStatus::Pending),
            Action::Toggle => store.toggle_task(id),
            Action::Remove => store.remove_by_id(id) > 0,
        }
    }
}

pub fn run(cmd: TaskCommands, store: &mut TaskStore, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::List { filter } => {
            list_tasks(output, store, filter.unwrap_or(config.default_filter))
        }
        TaskCommands::Show { id } => show_task(output, store, id),
        TaskCommands::Add { name, details } => {
            add_task(output, store, config, name.as_deref(), details)
        }
        TaskCommands::Complete { ids } => apply(output, store, Action::Complete, &ids),
        TaskCommands::Cancel { ids } => apply(output, store, Action::Cancel, &ids),
        TaskCommands::Reopen { ids } => apply(output, store, Action::Reopen, &ids),
        TaskCommands::Toggle { ids } => apply(output, store, Action::Toggle, &ids),
        TaskCommands::Remove { ids } => apply(output, store, Action::Remove, &ids),
        TaskCommands::Stats => stats(output, store),
    }
}

fn list_tasks(output: &Output, store: &TaskStore, filter: TaskFilter) -> Result<()> {
    output.verbose_ctx("list", &format!("Filter: {}", filter));

    let tasks = store.filter_tasks(filter);
    output.verbose_ctx("list", &format!("{} of {} tasks match", tasks.len(), store.len()));

    let empty = match filter {
        TaskFilter::All => "No tasks".to_string(),
        other => format!("No {} tasks", other),
    };
    output.tasks(tasks, &empty);

    Ok(())
}

fn show_task(output: &Output, store: &TaskStore, id: ItemId) -> Result<()> {
    let Some(task) = store.get_by_id(id) else {
        if output.is_json() {
            output.data(&serde_json::json!({
                "id": id,
                "found": false,
            }));
        } else {
            println!("Task not found: {}", id);
        }
        return Ok(());
    };

    if output.is_json() {
        output.data(task);
    } else {
        println!("Task: {}", task.id());
        println!("Name: {}", task.name);
        println!("Status: {}", task.status);
        if let Some(details) = &task.details {
            println!("\nDetails:");
            println!("{}", details);
        }
    }

    Ok(())
}

/// Reads a `--filter` value with the domain's fallback to `all`
fn parse_filter(value: &str) -> Result<TaskFilter, Infallible> {
    value.parse()
}

fn add_task(
    output: &Output,
    store: &mut TaskStore,
    config: &Config,
    name: Option<&str>,
    details: Option<String>,
) -> Result<()> {
    let mut ids = SequentialIds::after(store.max_id());
    if ids.peek().is_some_and(|next| next.value() < config.first_id) {
        ids = SequentialIds::starting_at(config.first_id);
    }

    let name = match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => config.untitled_name.as_str(),
    };

    let id = store.add_task(name, &mut ids)?.id();
    if let Some(details) = details {
        if let Some(task) = store.get_by_id_mut(id) {
            task.details = Some(details);
        }
    }
    output.verbose_ctx("add", &format!("Allocated ID {}", id));

    if !output.is_json() {
        output.success(&format!("Added task {}: {}", id, name));
        println!();
    }
    output.tasks(store.list(), "No tasks");

    Ok(())
}

fn apply(output: &Output, store: &mut TaskStore, action: Action, ids: &[ItemId]) -> Result<()> {
    for id in ids {
        if action.apply(store, *id) {
            if !output.is_json() {
                output.success(&format!("{} task {}", action.past_tense(), id));
            }
        } else {
            output.verbose_ctx("apply", &format!("No task with ID {}, skipped", id));
            if !output.is_json() {
                println!("Task not found: {}", id);
            }
        }
    }

    if !output.is_json() {
        println!();
    }
    output.tasks(store.list(), "No tasks");

    Ok(())
}

fn stats(output: &Output, store: &TaskStore) -> Result<()> {
    let counts = store.counts();

    if output.is_json() {
        output.data(&counts);
    } else {
        println!("Total:     {}", counts.total);
        println!("Pending:   {}", counts.pending);
        println!("Completed: {}", counts.completed);
        println!("Cancelled: {}", counts.cancelled);
    }

    Ok(())
}

/// Reports records that failed the shape check; fails if there are any
pub fn check(output: &Output, loaded: &Loaded) -> Result<()> {
    let valid = loaded.store.len();
    let rejected = loaded.rejected.len();

    if output.is_json() {
        output.data(&serde_json::json!({
            "valid": valid,
            "rejected": loaded.rejected,
        }));
    } else {
        println!("{} valid, {} rejected", valid, rejected);
        for entry in &loaded.rejected {
            println!("  record #{}: {}", entry.index, entry.violations.join(", "));
        }
    }

    if rejected > 0 {
        anyhow::bail!("{} record(s) failed the shape check", rejected);
    }

    Ok(())
}
