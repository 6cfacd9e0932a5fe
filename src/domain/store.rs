//! Task store
//!
//! An in-memory [`Collection`] of tasks with status-aware operations.
//! Operations on ids that are not stored are no-ops and report `false`.

use serde::Serialize;

use super::collection::{Collection, Snapshot};
use super::id::{IdAllocator, IdError, ItemId};
use super::task::{Task, TaskFilter, TaskStatus, UNTITLED_TASK};

/// Per-status totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total: usize,
}

/// Ordered store of tasks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Collection<Task>,
}

impl TaskStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task without checking its id
    pub fn add(&mut self, task: Task) {
        self.tasks.add(task);
    }

    /// Creates a pending task with a fresh id and appends it
    ///
    /// A blank name becomes [`UNTITLED_TASK`]. When the allocator has run
    /// out of ids the store is left unchanged.
    pub fn add_task(&mut self, name: &str, ids: &mut impl IdAllocator) -> Result<&Task, IdError> {
        let name = if name.trim().is_empty() {
            UNTITLED_TASK
        } else {
            name
        };
        let task = Task::new(ids.next_id()?, name);
        self.tasks.add(task);
        let last = self.tasks.len() - 1;
        Ok(&self.tasks.list()[last])
    }

    /// Returns the first task with the given id
    pub fn get_by_id(&self, id: ItemId) -> Option<&Task> {
        self.tasks.get_by_id(id)
    }

    /// Returns the first task with the given id, mutably
    pub fn get_by_id_mut(&mut self, id: ItemId) -> Option<&mut Task> {
        self.tasks.get_by_id_mut(id)
    }

    /// Removes every task with the given id
    pub fn remove_by_id(&mut self, id: ItemId) -> usize {
        self.tasks.remove_by_id(id)
    }

    /// Returns all tasks in insertion order
    pub fn list(&self) -> &[Task] {
        self.tasks.list()
    }

    /// Returns the tasks that satisfy the predicate
    pub fn filter<P>(&self, predicate: P) -> Vec<&Task>
    where
        P: Fn(&Task) -> bool,
    {
        self.tasks.filter(predicate)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the highest stored id
    pub fn max_id(&self) -> Option<ItemId> {
        self.tasks.max_id()
    }

    /// Takes a one-shot iterator over a copy of the current tasks
    pub fn snapshot(&self) -> Snapshot<Task> {
        self.tasks.snapshot()
    }

    /// Marks the first task with the given id completed
    pub fn complete_task(&mut self, id: ItemId) -> bool {
        self.update(id, Task::complete)
    }

    /// Sets the status of the first task with the given id
    pub fn set_status(&mut self, id: ItemId, status: TaskStatus) -> bool {
        self.update(id, |task| task.status = status)
    }

    /// Flips the first task with the given id between completed and pending
    pub fn toggle_task(&mut self, id: ItemId) -> bool {
        self.update(id, Task::toggle)
    }

    fn update(&mut self, id: ItemId, apply: impl FnOnce(&mut Task)) -> bool {
        match self.tasks.get_by_id_mut(id) {
            Some(task) => {
                apply(task);
                tracing::debug!(%id, status = %task.status, "task updated");
                true
            }
            None => {
                tracing::debug!(%id, "task not found, nothing to update");
                false
            }
        }
    }

    /// Returns the tasks in the given status view, in insertion order
    pub fn filter_tasks(&self, filter: TaskFilter) -> Vec<&Task> {
        self.filter(|task| filter.matches(task.status))
    }

    /// Counts tasks by status
    pub fn counts(&self) -> StatusCounts {
        self.tasks
            .iter()
            .fold(StatusCounts::default(), |mut counts, task| {
                match task.status {
                    TaskStatus::Pending => counts.pending += 1,
                    TaskStatus::Completed => counts.completed += 1,
                    TaskStatus::Cancelled => counts.cancelled += 1,
                }
                counts.total += 1;
                counts
            })
    }
}

impl FromIterator<Task> for TaskStore {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl Extend<Task> for TaskStore {
    fn extend<I: IntoIterator<Item = Task>>(&mut self, iter: I) {
        self.tasks.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TaskStore {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
