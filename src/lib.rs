//! tasklist - an in-memory task list
//!
//! A generic ordered [`Collection`] of id-keyed items, a [`TaskStore`] on top
//! of it with completion and status filtering, and a shape check for
//! loosely-typed task records. The `tasklist` binary loads records, runs one
//! command and prints the result.

pub mod domain;
pub mod loader;
pub mod cli;

pub use domain::{Collection, Item, ItemId, Task, TaskFilter, TaskStatus, TaskStore};
