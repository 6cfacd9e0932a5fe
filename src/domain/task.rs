//! Task domain model
//!
//! Tasks are named units of work with a three-valued status.
//! Any status may move to any other; there is no enforced lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::collection::Item;
use super::id::ItemId;

/// Name given to tasks created without one
pub const UNTITLED_TASK: &str = "Untitled Task";

#[derive(Debug, Error, PartialEq)]
pub enum ParseStatusError {
    #[error("Unknown task status '{0}': expected pending, completed or cancelled")]
    Unknown(String),
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns true if this task is still open
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskStatus::Pending)
    }

    /// Returns true if this task was abandoned
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskStatus::Cancelled)
    }

    /// Returns the lowercase label used in text and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Returns a checkbox marker for listings
    pub fn marker(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "[ ]",
            TaskStatus::Completed => "[x]",
            TaskStatus::Cancelled => "[-]",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(ParseStatusError::Unknown(s.to_string())),
        }
    }
}

/// Status view for listing tasks
///
/// There is deliberately no cancelled view: cancelled tasks only show up
/// under [`TaskFilter::All`]. Parsing never fails; unrecognized text,
/// `cancelled` included, means [`TaskFilter::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    /// Returns true if a task with the given status belongs in this view
    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => status == TaskStatus::Pending,
            TaskFilter::Completed => status == TaskStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = std::convert::Infallible;

    /// Unrecognized values fall back to `All`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "pending" => TaskFilter::Pending,
            "completed" => TaskFilter::Completed,
            _ => TaskFilter::All,
        })
    }
}

impl From<String> for TaskFilter {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

/// A unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: ItemId,

    /// Human-readable name
    pub name: String,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Optional free-text details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Task {
    /// Creates a new pending task
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: TaskStatus::Pending,
            details: None,
        }
    }

    /// Sets the details, builder style
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the status, builder style
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the task ID (immutable once assigned)
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Marks the task completed
    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
    }

    /// Marks the task cancelled
    pub fn cancel(&mut self) {
        self.status = TaskStatus::Cancelled;
    }

    /// Moves the task back to pending
    pub fn reopen(&mut self) {
        self.status = TaskStatus::Pending;
    }

    /// Flips between completed and not completed
    ///
    /// Completed becomes pending; pending and cancelled become completed.
    pub fn toggle(&mut self) {
        self.status = if self.status.is_complete() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
    }
}

impl Item for Task {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: i64) -> Task {
        Task::new(ItemId::new(id), format!("Task {}", id))
    }

    #[test]
    fn new_task_is_pending() {
        let task = make_task(1);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.status.is_pending());
        assert!(task.details.is_none());
    }

    #[test]
    fn status_transitions_are_unconstrained() {
        let mut task = make_task(1);

        task.complete();
        assert!(task.status.is_complete());

        task.cancel();
        assert!(task.status.is_cancelled());

        task.complete();
        assert_eq!(task.status, TaskStatus::Completed);

        task.reopen();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut task = make_task(1);

        task.toggle();
        assert_eq!(task.status, TaskStatus::Completed);

        task.toggle();
        assert_eq!(task.status, TaskStatus::Pending);

        task.cancel();
        task.toggle();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn parse_status() {
        assert_eq!("pending".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!(" Completed ".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert_eq!("CANCELLED".parse::<TaskStatus>(), Ok(TaskStatus::Cancelled));
        assert_eq!(
            "done".parse::<TaskStatus>(),
            Err(ParseStatusError::Unknown("done".to_string()))
        );
    }

    #[test]
    fn filter_parse_falls_back_to_all() {
        assert_eq!("pending".parse::<TaskFilter>().unwrap(), TaskFilter::Pending);
        assert_eq!("completed".parse::<TaskFilter>().unwrap(), TaskFilter::Completed);
        assert_eq!("all".parse::<TaskFilter>().unwrap(), TaskFilter::All);
        assert_eq!("cancelled".parse::<TaskFilter>().unwrap(), TaskFilter::All);
        assert_eq!("whatever".parse::<TaskFilter>().unwrap(), TaskFilter::All);
    }

    #[test]
    fn filter_deserializes_leniently() {
        let filter: TaskFilter = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(filter, TaskFilter::Completed);

        let filter: TaskFilter = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(filter, TaskFilter::All);

        assert_eq!(serde_json::to_string(&TaskFilter::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn filter_matches() {
        assert!(TaskFilter::All.matches(TaskStatus::Cancelled));
        assert!(TaskFilter::Pending.matches(TaskStatus::Pending));
        assert!(!TaskFilter::Pending.matches(TaskStatus::Cancelled));
        assert!(TaskFilter::Completed.matches(TaskStatus::Completed));
        assert!(!TaskFilter::Completed.matches(TaskStatus::Pending));
    }

    #[test]
    fn serde_roundtrip() {
        let task = make_task(4)
            .with_details("Write tests")
            .with_status(TaskStatus::Cancelled);

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"status\":\"cancelled\""));

        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn details_omitted_when_absent() {
        let json = serde_json::to_value(make_task(1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 1, "name": "Task 1", "status": "pending" })
        );
    }

    #[test]
    fn missing_status_deserializes_as_pending() {
        let task: Task = serde_json::from_str(r#"{"id": 2, "name": "Build"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.id(), ItemId::new(2));
    }
}
