//! Reading task records from files or stdin
//!
//! Input is a JSON or YAML sequence of loosely-typed records, or an object
//! with a `tasks` sequence. Each record goes through the shape guard;
//! records that fail it are kept aside as [`Rejected`] instead of failing
//! the load.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{validate_task, TaskStore, Violation};

/// Encoding of an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    /// Picks the format from a file extension; anything unknown is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => RecordFormat::Yaml,
            _ => RecordFormat::Json,
        }
    }
}

/// A record excluded from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejected {
    /// Position in the input, starting at 0
    pub index: usize,
    /// The record as given
    pub record: Value,
    /// Why it was excluded
    pub violations: Vec<String>,
}

/// Result of loading records into a store
#[derive(Debug, Default)]
pub struct Loaded {
    pub store: TaskStore,
    pub rejected: Vec<Rejected>,
}

/// Reads records from a path, or from stdin when the path is `-`
pub fn read_records(source: &str) -> Result<Vec<Value>> {
    if source == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read records from stdin")?;
        return parse_records(&content, RecordFormat::Json).context("Failed to parse stdin");
    }

    let path = Path::new(source);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input: {}", path.display()))?;

    parse_records(&content, RecordFormat::from_path(path))
        .with_context(|| format!("Failed to parse input: {}", path.display()))
}

/// Parses records from text
pub fn parse_records(content: &str, format: RecordFormat) -> Result<Vec<Value>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = match format {
        RecordFormat::Json => serde_json::from_str(content).context("Invalid JSON")?,
        RecordFormat::Yaml => serde_yaml::from_str(content).context("Invalid YAML")?,
    };

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("tasks") {
            Some(Value::Array(records)) => Ok(records),
            _ => anyhow::bail!("Expected a list of records or an object with a 'tasks' list"),
        },
        Value::Null => Ok(Vec::new()),
        _ => anyhow::bail!("Expected a list of records or an object with a 'tasks' list"),
    }
}

/// Adds every task-shaped record to a new store, in input order
pub fn load_store(records: Vec<Value>) -> Loaded {
    let mut loaded = Loaded::default();

    for (index, record) in records.into_iter().enumerate() {
        match validate_task(&record) {
            Ok(task) => loaded.store.add(task),
            Err(err) => {
                tracing::debug!(index, error = %err, "record rejected");
                loaded.rejected.push(Rejected {
                    index,
                    record,
                    violations: err.violations.iter().map(Violation::to_string).collect(),
                });
            }
        }
    }

    loaded
}
