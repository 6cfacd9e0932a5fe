//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | View | Read the list | `list`, `show`, `stats` |
//! | Change | Edit tasks in memory | `add`, `complete`, `cancel`, `reopen`, `toggle`, `remove` |
//! | Input | Validate records | `check` |
//! | Demo | Walkthrough | `demo` |
//!
//! Tasks come from `--input` (a JSON or YAML list, `-` for stdin) and are
//! never written back. Use `--format json` to get output that can be fed
//! into the next command:
//!
//! ```bash
//! tasklist -i tasks.json -f json complete 1 > next.json
//! ```
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;
mod demo;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
