//! In-process table store
//!
//! Tables are `RwLock`-guarded maps with per-table sequential id counters.
//! Operations are grouped by entity in the sibling modules; all of them are
//! async to keep the repository interface stable if a real database is wired
//! in later.

mod bulletin_ops;
mod plaza_ops;
mod product_ops;
mod rbac_ops;
mod store_ops;
mod user_ops;

#[cfg(test)]
mod tests;

use crate::core::models::{Bulletin, PermissionRecord, Plaza, Product, RoleRecord, Store, User};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Database holding all domain tables
#[derive(Debug, Default)]
pub struct Database {
    pub(super) users: Table<User>,
    pub(super) plazas: Table<Plaza>,
    pub(super) stores: Table<Store>,
    pub(super) bulletins: Table<Bulletin>,
    pub(super) products: Table<Product>,
    pub(super) roles: Table<RoleRecord>,
    pub(super) permissions: Table<PermissionRecord>,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single table: row map plus id sequence
#[derive(Debug)]
pub(super) struct Table<T> {
    rows: RwLock<HashMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Clone> Table<T> {
    /// Insert a row, assigning the next sequential id via `set_id`
    pub(super) fn insert(&self, mut row: T, set_id: impl FnOnce(&mut T, i64)) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        set_id(&mut row, id);
        self.rows.write().insert(id, row.clone());
        row
    }

    /// Replace an existing row by id; returns false if the id is unknown
    pub(super) fn replace(&self, id: i64, row: T) -> bool {
        let mut rows = self.rows.write();
        if rows.contains_key(&id) {
            rows.insert(id, row);
            true
        } else {
            false
        }
    }

    /// Fetch a row by id
    pub(super) fn get(&self, id: i64) -> Option<T> {
        self.rows.read().get(&id).cloned()
    }

    /// First row matching the predicate
    pub(super) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().values().find(|row| predicate(row)).cloned()
    }

    /// All rows matching the predicate
    pub(super) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    /// Whether any row matches the predicate
    pub(super) fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.rows.read().values().any(|row| predicate(row))
    }

    /// Number of rows
    pub(super) fn len(&self) -> usize {
        self.rows.read().len()
    }
}
