//! Domain models for tasklist
//!
//! Contains the core collection and task logic without any I/O concerns.

mod id;
mod collection;
mod task;
mod store;
mod guard;

pub use id::{IdAllocator, IdError, ItemId, SequentialIds};
pub use collection::{Collection, Item, Snapshot};
pub use task::{ParseStatusError, Task, TaskFilter, TaskStatus, UNTITLED_TASK};
pub use store::{StatusCounts, TaskStore};
pub use guard::{is_task, validate_task, ShapeError, Violation};
