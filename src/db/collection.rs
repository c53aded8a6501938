use std::collections::BTreeMap;

use super::{StorageError, StorageResult};

/// One keyed table of the entity store.
///
/// Ids come from a per-collection counter that starts at 1 and is never
/// rewound, so a deleted id is not handed out again. Rows live in a
/// `BTreeMap` keyed by that id, which makes iteration order equal to
/// insertion order.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Collection<T> {
    /// Reserves the next id, builds the row with it and stores it.
    ///
    /// The last id handed out is `i32::MAX - 1`; after that inserts fail
    /// instead of wrapping.
    pub fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> StorageResult<T> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(StorageError::IdsExhausted)?;
        let row = build(id);
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    pub fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| predicate(row)).cloned()
    }

    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.rows.values().filter(|row| predicate(row)).count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Runs `change` against the stored row and returns the result, or
    /// `None` when the id is unknown.
    pub fn update(&mut self, id: i32, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    /// Deleting a missing id is a no-op.
    pub fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Drops every row matching `predicate`, returning how many went.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        before - self.rows.len()
    }
}
