//! Shape check for loosely-typed task records
//!
//! Records coming from files or stdin are plain JSON values. A record may be
//! treated as a [`Task`] when it is an object with a numeric `id` and a
//! textual `name`. Nothing else is checked: an unknown or missing `status`
//! falls back to pending rather than failing the check.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::id::ItemId;
use super::task::{Task, TaskStatus};

/// A single reason a record is not task-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    NotAnObject,
    MissingId,
    IdNotNumeric,
    IdNotInteger,
    IdOutOfRange,
    MissingName,
    NameNotText,
}

impl Violation {
    /// Returns the field the violation concerns
    pub fn field(&self) -> &'static str {
        match self {
            Violation::NotAnObject => "record",
            Violation::MissingId
            | Violation::IdNotNumeric
            | Violation::IdNotInteger
            | Violation::IdOutOfRange => "id",
            Violation::MissingName | Violation::NameNotText => "name",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Violation::NotAnObject => "record is not an object",
            Violation::MissingId => "missing 'id'",
            Violation::IdNotNumeric => "'id' is not a number",
            Violation::IdNotInteger => "'id' is not a whole number",
            Violation::IdOutOfRange => "'id' is outside the integer range",
            Violation::MissingName => "missing 'name'",
            Violation::NameNotText => "'name' is not text",
        };
        f.write_str(message)
    }
}

/// Every violation found in a rejected record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a task: {}", join(.violations))]
pub struct ShapeError {
    pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads a numeric `id`. Whole floats such as `3.0` count as integers.
fn numeric_id(value: &Value) -> Result<ItemId, Violation> {
    let Value::Number(n) = value else {
        return Err(Violation::IdNotNumeric);
    };
    if let Some(id) = n.as_i64() {
        return Ok(ItemId::new(id));
    }
    if n.is_u64() {
        return Err(Violation::IdOutOfRange);
    }

    let f = n.as_f64().ok_or(Violation::IdNotNumeric)?;
    if f.fract() != 0.0 {
        return Err(Violation::IdNotInteger);
    }
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(Violation::IdOutOfRange);
    }
    Ok(ItemId::new(f as i64))
}

/// Checks a record and builds a task from it
pub fn validate_task(value: &Value) -> Result<Task, ShapeError> {
    let Some(obj) = value.as_object() else {
        return Err(ShapeError {
            violations: vec![Violation::NotAnObject],
        });
    };

    let mut violations = Vec::new();

    let id = match obj.get("id") {
        None => {
            violations.push(Violation::MissingId);
            None
        }
        Some(v) => match numeric_id(v) {
            Ok(id) => Some(id),
            Err(violation) => {
                violations.push(violation);
                None
            }
        },
    };

    let name = match obj.get("name") {
        None => {
            violations.push(Violation::MissingName);
            None
        }
        Some(v) => {
            let name = v.as_str();
            if name.is_none() {
                violations.push(Violation::NameNotText);
            }
            name
        }
    };

    match (id, name) {
        (Some(id), Some(name)) => {
            let status = obj
                .get("status")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<TaskStatus>().ok())
                .unwrap_or_default();

            let mut task = Task::new(id, name).with_status(status);
            task.details = obj
                .get("details")
                .and_then(Value::as_str)
                .map(str::to_string);
            Ok(task)
        }
        _ => Err(ShapeError { violations }),
    }
}

/// Returns true if the record can be treated as a task
pub fn is_task(value: &Value) -> bool {
    validate_task(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_record() {
        let task = validate_task(&json!({ "id": 3, "name": "Test Task" })).unwrap();
        assert_eq!(task.id(), ItemId::new(3));
        assert_eq!(task.name, "Test Task");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.details.is_none());
    }

    #[test]
    fn reads_status_and_details() {
        let task = validate_task(&json!({
            "id": 1,
            "name": "Ship",
            "status": "completed",
            "details": "after review",
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.details.as_deref(), Some("after review"));
    }

    #[test]
    fn status_is_not_validated() {
        let task = validate_task(&json!({ "id": 1, "name": "x", "status": "bogus" })).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);

        let task = validate_task(&json!({ "id": 1, "name": "x", "status": 2 })).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn non_text_details_are_dropped() {
        let task = validate_task(&json!({ "id": 1, "name": "x", "details": 5 })).unwrap();
        assert!(task.details.is_none());
    }

    #[test]
    fn rejects_non_objects() {
        for value in [json!(null), json!(1), json!("task"), json!([1, 2])] {
            let err = validate_task(&value).unwrap_err();
            assert_eq!(err.violations, vec![Violation::NotAnObject]);
            assert!(!is_task(&value));
        }
    }

    #[test]
    fn collects_every_violation() {
        let err = validate_task(&json!({})).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::MissingId, Violation::MissingName]
        );

        let err = validate_task(&json!({ "id": "3", "name": 7 })).unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::IdNotNumeric, Violation::NameNotText]
        );
    }

    #[test]
    fn accepts_negative_and_zero_ids() {
        let task = validate_task(&json!({ "id": -1, "name": "x" })).unwrap();
        assert_eq!(task.id(), ItemId::new(-1));
        assert!(is_task(&json!({ "id": 0, "name": "x" })));
        assert!(is_task(&json!({ "id": i64::MIN, "name": "x" })));
    }

    #[test]
    fn accepts_whole_float_ids() {
        let task = validate_task(&json!({ "id": 3.0, "name": "x" })).unwrap();
        assert_eq!(task.id(), ItemId::new(3));
    }

    #[test]
    fn fractional_id_has_its_own_violation() {
        let err = validate_task(&json!({ "id": 1.5, "name": "x" })).unwrap_err();
        assert_eq!(err.violations, vec![Violation::IdNotInteger]);
        assert_eq!(err.to_string(), "not a task: 'id' is not a whole number");
    }

    #[test]
    fn huge_ids_are_out_of_range() {
        let err = validate_task(&json!({ "id": 1e20, "name": "x" })).unwrap_err();
        assert_eq!(err.violations, vec![Violation::IdOutOfRange]);

        let err = validate_task(&json!({ "id": u64::MAX, "name": "x" })).unwrap_err();
        assert_eq!(err.violations, vec![Violation::IdOutOfRange]);
        assert_eq!(err.violations[0].field(), "id");
    }

    #[test]
    fn string_id_is_not_numeric() {
        let err = validate_task(&json!({ "id": "4", "name": "x" })).unwrap_err();
        assert_eq!(err.to_string(), "not a task: 'id' is not a number");
    }

    #[test]
    fn error_message_lists_violations() {
        let err = validate_task(&json!({ "name": true })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not a task: missing 'id', 'name' is not text"
        );
        assert_eq!(err.violations[0].field(), "id");
        assert_eq!(err.violations[1].field(), "name");
    }
}
