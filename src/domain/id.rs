//! Numeric item identifiers and id allocation
//!
//! ID Format:
//! - Item IDs are plain signed integers (e.g., `1`, `42`, `-3`)
//! - Serialized as JSON numbers, displayed without decoration
//!
//! New ids come from an [`IdAllocator`] owned by the caller, so assignment
//! is deterministic and can be replayed in tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid item ID: expected an integer, got '{0}'")]
    InvalidItemId(String),

    #[error("No item IDs left: the largest ID is already taken")]
    Exhausted,
}

/// Identifier of a stored item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates an ID from its numeric value
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the ID immediately after this one, if there is one
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| IdError::InvalidItemId(s.to_string()))
    }
}

/// Source of fresh item IDs
pub trait IdAllocator {
    /// Returns the next unused ID, or [`IdError::Exhausted`] once none are left
    fn next_id(&mut self) -> Result<ItemId, IdError>;
}

/// Monotonically increasing counter
///
/// Never hands out the same ID twice: after `i64::MAX` it is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    next: Option<i64>,
}

impl SequentialIds {
    /// Creates a counter whose first ID is `first`
    pub fn starting_at(first: i64) -> Self {
        Self { next: Some(first) }
    }

    /// Creates a counter that continues after `max`, or starts at 1
    pub fn after(max: Option<ItemId>) -> Self {
        match max {
            Some(id) => Self {
                next: id.next().map(ItemId::value),
            },
            None => Self::starting_at(1),
        }
    }

    /// Returns the ID the next call to `next_id` will hand out
    pub fn peek(&self) -> Option<ItemId> {
        self.next.map(ItemId)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self) -> Result<ItemId, IdError> {
        let value = self.next.ok_or(IdError::Exhausted)?;
        self.next = value.checked_add(1);
        Ok(ItemId(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_item_id() {
        let id: ItemId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: ItemId = "  7 ".parse().unwrap();
        assert_eq!(id, ItemId::new(7));
    }

    #[test]
    fn parse_negative_id() {
        let id: ItemId = "-1".parse().unwrap();
        assert_eq!(id, ItemId::new(-1));
        assert_eq!(id.to_string(), "-1");
    }

    #[test]
    fn reject_invalid_ids() {
        assert!("".parse::<ItemId>().is_err());
        assert!("abc".parse::<ItemId>().is_err());
        assert!("1.5".parse::<ItemId>().is_err());
        assert!("9223372036854775808".parse::<ItemId>().is_err());

        let err = "abc".parse::<ItemId>().unwrap_err();
        assert_eq!(err, IdError::InvalidItemId("abc".to_string()));
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ItemId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: ItemId = serde_json::from_str("-12").unwrap();
        assert_eq!(id, ItemId::new(-12));
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), Ok(ItemId::new(1)));
        assert_eq!(ids.next_id(), Ok(ItemId::new(2)));
        assert_eq!(ids.peek(), Some(ItemId::new(3)));

        let mut again = SequentialIds::default();
        assert_eq!(again.next_id(), Ok(ItemId::new(1)));
    }

    #[test]
    fn sequential_ids_continue_after_max() {
        let mut ids = SequentialIds::after(Some(ItemId::new(9)));
        assert_eq!(ids.next_id(), Ok(ItemId::new(10)));

        let mut negative = SequentialIds::after(Some(ItemId::new(-5)));
        assert_eq!(negative.next_id(), Ok(ItemId::new(-4)));

        let mut empty = SequentialIds::after(None);
        assert_eq!(empty.next_id(), Ok(ItemId::new(1)));
    }

    #[test]
    fn next_stops_at_largest_id() {
        assert_eq!(ItemId::new(i64::MAX - 1).next(), Some(ItemId::new(i64::MAX)));
        assert_eq!(ItemId::new(i64::MAX).next(), None);
    }

    #[test]
    fn counter_never_repeats_largest_id() {
        let mut ids = SequentialIds::starting_at(i64::MAX);
        assert_eq!(ids.next_id(), Ok(ItemId::new(i64::MAX)));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.next_id(), Err(IdError::Exhausted));
        assert_eq!(ids.next_id(), Err(IdError::Exhausted));
    }

    #[test]
    fn counter_after_largest_id_is_exhausted() {
        let mut ids = SequentialIds::after(Some(ItemId::new(i64::MAX)));
        assert_eq!(ids.peek(), None);
        assert_eq!(ids.next_id(), Err(IdError::Exhausted));
    }
}
