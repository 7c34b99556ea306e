//! Generic JSON-backed table
//!
//! Each table lives in its own file holding the next id to hand out and
//! the rows themselves:
//!
//! ```json
//! { "next_id": 4, "records": [ { "id": 1, ... }, { "id": 3, ... } ] }
//! ```
//!
//! Ids start at 1 and are never reused, even after the highest row is
//! deleted.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, Expense, ExpenseId, Income, IncomeId, User, UserId};

use super::file_io::{read_json, write_json_atomic};

/// A row type that can be stored in a [`JsonTable`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Ord + Display + From<u64> + Into<u64>;

    /// Name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
    fn set_id(&mut self, id: Self::Id);
}

/// A row that belongs to a user
pub trait Owned {
    fn owner(&self) -> UserId;
}

macro_rules! impl_record {
    ($ty:ty, $id:ty, $entity:literal) => {
        impl Record for $ty {
            type Id = $id;
            const ENTITY: &'static str = $entity;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn set_id(&mut self, id: Self::Id) {
                self.id = id;
            }
        }
    };
}

impl_record!(User, UserId, "User");
impl_record!(Category, CategoryId, "Category");
impl_record!(Expense, ExpenseId, "Expense");
impl_record!(Income, IncomeId, "Income");

impl Owned for Category {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl Owned for Expense {
    fn owner(&self) -> UserId {
        self.owner
    }
}

impl Owned for Income {
    fn owner(&self) -> UserId {
        self.owner
    }
}

/// On-disk layout of a table file
#[derive(Debug, Serialize, Deserialize)]
struct TableFile<T> {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

fn first_id() -> u64 {
    1
}

impl<T> Default for TableFile<T> {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            records: Vec::new(),
        }
    }
}

struct TableState<T: Record> {
    next_id: u64,
    rows: BTreeMap<T::Id, T>,
}

/// In-memory table persisted as a single JSON file
pub struct JsonTable<T: Record> {
    path: PathBuf,
    state: RwLock<TableState<T>>,
}

impl<T: Record> JsonTable<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(TableState {
                next_id: first_id(),
                rows: BTreeMap::new(),
            }),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> TrackerResult<RwLockReadGuard<'_, TableState<T>>> {
        self.state
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, TableState<T>>> {
        self.state
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory rows with the file contents
    pub fn load(&self) -> TrackerResult<()> {
        let file: TableFile<T> = read_json(&self.path)?;
        let mut state = self.write()?;

        state.rows = file.records.into_iter().map(|r| (r.id(), r)).collect();
        // A hand-edited file may carry a stale counter
        let past_last = state
            .rows
            .keys()
            .next_back()
            .map(|id| {
                let raw: u64 = (*id).into();
                raw + 1
            })
            .unwrap_or(first_id());
        state.next_id = file.next_id.max(past_last);

        debug!(
            table = T::ENTITY,
            rows = state.rows.len(),
            next_id = state.next_id,
            "loaded table"
        );
        Ok(())
    }

    pub fn save(&self) -> TrackerResult<()> {
        let state = self.read()?;
        let file = TableFile {
            next_id: state.next_id,
            records: state.rows.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file)?;
        debug!(table = T::ENTITY, rows = file.records.len(), "saved table");
        Ok(())
    }

    /// Insert a new row, assigning the next id
    pub fn insert(&self, mut record: T) -> TrackerResult<T> {
        let mut state = self.write()?;
        let id = T::Id::from(state.next_id);
        state.next_id += 1;
        record.set_id(id);
        state.rows.insert(id, record.clone());
        Ok(record)
    }

    pub fn get(&self, id: T::Id) -> TrackerResult<Option<T>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    /// Replace an existing row
    pub fn update(&self, record: T) -> TrackerResult<()> {
        let mut state = self.write()?;
        let id = record.id();
        match state.rows.get_mut(&id) {
            Some(row) => {
                *row = record;
                Ok(())
            }
            None => Err(TrackerError::NotFound {
                entity_type: T::ENTITY,
                identifier: id.to_string(),
            }),
        }
    }

    /// Remove a row, returning it if it existed
    pub fn delete(&self, id: T::Id) -> TrackerResult<Option<T>> {
        Ok(self.write()?.rows.remove(&id))
    }

    /// Remove every row matching `pred`, returning the removed rows
    pub fn delete_where(&self, pred: impl Fn(&T) -> bool) -> TrackerResult<Vec<T>> {
        let mut state = self.write()?;
        let ids: Vec<T::Id> = state
            .rows
            .iter()
            .filter(|(_, row)| pred(row))
            .map(|(id, _)| *id)
            .collect();
        Ok(ids.into_iter().filter_map(|id| state.rows.remove(&id)).collect())
    }

    /// All rows in id order
    pub fn list(&self) -> TrackerResult<Vec<T>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    /// Rows matching `pred`, in id order
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> TrackerResult<Vec<T>> {
        Ok(self.read()?.rows.values().filter(|r| pred(r)).cloned().collect())
    }

    /// First row matching `pred`
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> TrackerResult<Option<T>> {
        Ok(self.read()?.rows.values().find(|r| pred(r)).cloned())
    }

    pub fn count(&self) -> TrackerResult<usize> {
        Ok(self.read()?.rows.len())
    }
}

impl<T: Record + Owned> JsonTable<T> {
    /// Rows owned by `owner`
    pub fn owned_by(&self, owner: UserId) -> TrackerResult<Vec<T>> {
        self.filter(|r| r.owner() == owner)
    }

    /// A row by id, but only if `owner` owns it
    pub fn get_owned(&self, id: T::Id, owner: UserId) -> TrackerResult<Option<T>> {
        Ok(self.get(id)?.filter(|r| r.owner() == owner))
    }
}
