//! ## hello-core::registry
//! **Owned, insertion-ordered record storage**
//!
//! Records are boxed and kept in a `VecDeque`, so appends go to the tail and the
//! drain pops from the head in O(1). Growth is fallible: the registry reserves
//! space with `try_reserve`, may carry a record limit, and hands the record back
//! if either check fails.

use std::collections::{TryReserveError, VecDeque};

use thiserror::Error;

use crate::record::{Record, Timestamp};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry limit of {limit} records reached")]
    LimitReached { limit: usize },

    #[error("{0}")]
    Reserve(#[from] TryReserveError),
}

#[derive(Debug, Default)]
pub struct Registry {
    records: VecDeque<Box<Record>>,
    limit: Option<usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry refusing appends once it holds `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Appends `record` at the tail.
    ///
    /// On failure the record is returned to the caller, who remains responsible
    /// for releasing it.
    pub fn push(&mut self, record: Box<Record>) -> Result<(), (Box<Record>, RegistryError)> {
        if let Some(limit) = self.limit {
            if self.records.len() >= limit {
                return Err((record, RegistryError::LimitReached { limit }));
            }
        }
        if let Err(err) = self.records.try_reserve(1) {
            return Err((record, err.into()));
        }
        self.records.push_back(record);
        Ok(())
    }

    /// Removes the oldest record.
    pub fn pop_front(&mut self) -> Option<Box<Record>> {
        self.records.pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Timestamps of the live records, oldest first.
    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.records.iter().map(|record| record.timestamp())
    }
}
