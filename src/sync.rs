use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::table::Table;

/// A cloneable handle to one table, shared between tasks.
///
/// Holding the guard across a phase-advancing call keeps any other caller
/// from starting an overlapping one on the same table.
#[derive(Debug, Clone)]
pub struct TableHandle(Arc<Mutex<Table>>);

impl TableHandle {
    /// Wraps a table.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self(Arc::new(Mutex::new(table)))
    }

    /// Waits for exclusive access to the table.
    pub async fn lock(&self) -> MutexGuard<'_, Table> {
        self.0.lock().await
    }
}

impl From<Table> for TableHandle {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}
