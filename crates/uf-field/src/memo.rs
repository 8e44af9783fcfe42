//! Per-node particularization cache.
//!
//! Every scalar/expression node owns a [`Memo`]: a map from factory identity
//! to a set-once cell holding that factory's result. The map lock is only
//! held to find or insert the cell, never while computing, so evaluation of
//! child nodes (each with their own memo) cannot deadlock. Two threads racing
//! on an empty cell may both compute; the first to publish wins and both
//! return the published value.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use uf_core::FactoryId;

type Cell = Arc<OnceLock<Arc<dyn Any + Send + Sync>>>;

#[derive(Default)]
pub struct Memo {
    cells: Mutex<HashMap<FactoryId, Cell>>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing and publishing it first
    /// if absent. Failures are returned to the caller and not cached.
    pub fn get_or_compute<T, E>(
        &self,
        key: FactoryId,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
    {
        let cell = self.cell(key);
        if let Some(value) = cell.get().and_then(|v| v.downcast_ref::<T>()) {
            return Ok(value.clone());
        }

        tracing::trace!(factory = %key, "memo miss");
        let value = compute()?;
        let published =
            cell.get_or_init(|| Arc::new(value.clone()) as Arc<dyn Any + Send + Sync>);
        Ok(published.downcast_ref::<T>().cloned().unwrap_or(value))
    }

    /// True when a value of type `T` has been published for `key`.
    pub fn contains<T: 'static>(&self, key: FactoryId) -> bool {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells
            .get(&key)
            .and_then(|cell| cell.get())
            .is_some_and(|value| value.is::<T>())
    }

    /// Number of factories with a published value.
    pub fn len(&self) -> usize {
        let cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.values().filter(|c| c.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: FactoryId) -> Cell {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        cells.entry(key).or_default().clone()
    }
}

impl fmt::Debug for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo").field("entries", &self.len()).finish()
    }
}
