//! # Loader
//!
//! Everything that reads from outside the process: configuration and
//! task records. Nothing is ever written back.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `--config <path>` or `<config dir>/tasklist/config.toml` |
//! | Records | JSON or YAML list | `--input <path>`, or `-` for stdin (JSON) |

mod config;
mod records;

pub use config::{Config, ConfigError, OutputFormat};
pub use records::{load_store, parse_records, read_records, Loaded, RecordFormat, Rejected};
