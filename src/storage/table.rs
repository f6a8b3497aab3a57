use std::collections::BTreeMap;

use crate::schema::Id;

/// Identity-keyed rows for one entity type.
///
/// Ids start at 1 and are never reused. Rows iterate in id order, which is
/// also insertion order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

impl<T: Clone> Table<T> {
    /// Allocates the next id, builds the row with it and stores it.
    pub fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;

        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// Replaces an existing row with `update(&old)`. `None` if `id` is unknown.
    pub fn replace(&mut self, id: Id, update: impl FnOnce(&T) -> T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        let row = update(slot);
        *slot = row.clone();
        Some(row)
    }

    pub fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| keep(row)).cloned().collect()
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}
