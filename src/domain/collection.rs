//! Generic ordered item collection
//!
//! Items are kept in insertion order and addressed by their [`ItemId`].
//! The collection never checks ids for uniqueness: lookups return the
//! first match in insertion order and removal drops every match.

use std::iter::FusedIterator;

use super::id::ItemId;

/// Anything that can be stored in a [`Collection`]
pub trait Item {
    /// Returns the identifier of this item
    fn id(&self) -> ItemId;
}

/// Insertion-ordered store of items
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Item> Collection<T> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item to the end
    pub fn add(&mut self, item: T) {
        tracing::debug!(id = %item.id(), position = self.items.len(), "item added");
        self.items.push(item);
    }

    /// Returns the first item with the given ID
    pub fn get_by_id(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Returns the first item with the given ID, mutably
    pub fn get_by_id_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Removes every item with the given ID, returning how many were removed
    pub fn remove_by_id(&mut self, id: ItemId) -> usize {
        let len_before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = len_before - self.items.len();
        tracing::debug!(%id, removed, "remove by id");
        removed
    }

    /// Returns true if some item has the given ID
    pub fn contains(&self, id: ItemId) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Returns the items that satisfy the predicate, in order
    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// Returns the highest stored ID
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(Item::id).max()
    }
}

impl<T> Collection<T> {
    /// Returns all items in current order
    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// Iterates over all items in current order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Collection<T> {
    /// Returns an owned copy of all items
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Takes a one-shot iterator over a copy of the current items
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            inner: self.items.clone().into_iter(),
        }
    }
}

impl<T: Item> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<T: Item> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Single-pass iterator over the items present when it was taken
///
/// Consuming it does not touch the collection, and later changes to the
/// collection are not visible through it. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for Snapshot<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Snapshot<T> {}

impl<T> FusedIterator for Snapshot<T> {}
