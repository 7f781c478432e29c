//! Id-keyed record table shared by both entity kinds.

use std::collections::BTreeMap;

use crate::model::{Course, Student};

/// First id handed out by a fresh or reset table.
pub const FIRST_ID: u64 = 1;

/// A record stored in a [`Table`].
pub trait Record: Clone {
    /// Returns the record id.
    fn id(&self) -> u64;
}

impl Record for Student {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Course {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Records of one kind plus the counter assigning their ids.
///
/// Rows are keyed by id. Ids only grow, so iteration order is insertion
/// order.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: BTreeMap<u64, R>,
    next_id: u64,
}

impl<R: Record> Table<R> {
    /// Creates an empty table whose first id is [`FIRST_ID`].
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: FIRST_ID,
        }
    }

    /// Reserves the next id. Reserved ids are never handed out again,
    /// even when the row is later removed.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Returns the id the next allocation will produce.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Inserts a row under its own id.
    pub fn insert(&mut self, row: R) {
        self.rows.insert(row.id(), row);
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut R> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn remove(&mut self, id: u64) -> Option<R> {
        self.rows.remove(&id)
    }

    /// Iterates rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    /// Returns true if any row other than `exclude` matches `predicate`.
    pub fn any_other<F>(&self, exclude: Option<u64>, predicate: F) -> bool
    where
        F: Fn(&R) -> bool,
    {
        self.rows
            .iter()
            .any(|(id, row)| Some(*id) != exclude && predicate(row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops every row and restarts the id sequence.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.next_id = FIRST_ID;
    }
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}
