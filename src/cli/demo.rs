//! Guided walkthrough of the task store
//!
//! Builds a small store from scratch and prints each step. Useful as a
//! smoke test and as living documentation of the store's behavior.

use anyhow::Result;
use serde_json::json;

use super::output::Output;
use crate::domain::{validate_task, IdAllocator, ItemId, SequentialIds, TaskFilter, TaskStore};

/// ID the walkthrough looks up but never adds
const MISSING_ID: ItemId = ItemId::new(5);

pub fn run(output: &Output) -> Result<()> {
    let mut store = TaskStore::new();
    let mut ids = SequentialIds::default();

    store.add_task("Learn Rust", &mut ids)?;
    store.add_task("Build Todo App", &mut ids)?;
    output.verbose_ctx("demo", &format!("Added {} tasks", store.len()));

    // Records from outside are only admitted if they pass the shape check
    let next = ids.next_id()?;
    let external = [
        json!({ "id": next, "name": "Test Task", "status": "pending" }),
        json!({ "id": "4", "name": "Write tests" }),
    ];
    let mut rejected = Vec::new();
    for record in &external {
        match validate_task(record) {
            Ok(task) => store.add(task),
            Err(err) => rejected.push(err.to_string()),
        }
    }

    store.complete_task(ItemId::new(1));

    let walked: Vec<String> = store.snapshot().map(|task| task.name).collect();

    store.toggle_task(ItemId::new(2));

    if output.is_json() {
        output.data(&json!({
            "all": store.list(),
            "completed": store.filter_tasks(TaskFilter::Completed),
            "pending": store.filter_tasks(TaskFilter::Pending),
            "walked": walked,
            "rejected": rejected,
            "lookup": {
                "id": MISSING_ID,
                "found": store.get_by_id(MISSING_ID).is_some(),
            },
        }));
        return Ok(());
    }

    println!("All tasks:");
    output.tasks(store.filter_tasks(TaskFilter::All), "No tasks");
    println!();

    println!("Completed tasks:");
    output.tasks(store.filter_tasks(TaskFilter::Completed), "No completed tasks");
    println!();

    println!("Walking a snapshot:");
    for name in &walked {
        println!("  Task: {}", name);
    }
    println!();

    if !rejected.is_empty() {
        println!("Rejected records:");
        for reason in &rejected {
            println!("  {}", reason);
        }
        println!();
    }

    println!("Checklist:");
    for task in store.list() {
        println!("  {} {}", task.status.marker(), task.name);
    }
    println!();

    let name = store
        .get_by_id(MISSING_ID)
        .map(|task| task.name.as_str())
        .unwrap_or("Task not found");
    println!("Lookup {}: {}", MISSING_ID, name);

    Ok(())
}
