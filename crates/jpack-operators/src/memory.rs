//! In-memory data handle.
//!
//! Serves named tables to `select * from <name>` (or a bare table name) and
//! counts open cursors, so tests and the CLI can drive operators without a
//! real engine and check that streams never leak a sub-cursor.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jpack_core::schema::Row;

use crate::host::{Cursor, DataHandle};
use crate::traits::OpError;

struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Clone, Default)]
pub struct MemoryHandle {
    tables: HashMap<String, Arc<Table>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a table. Names are case-insensitive.
    pub fn insert_table(&mut self, name: &str, columns: Vec<String>, rows: Vec<Row>) {
        self.tables
            .insert(name.to_ascii_lowercase(), Arc::new(Table { columns, rows }));
    }

    pub fn with_table(mut self, name: &str, columns: Vec<String>, rows: Vec<Row>) -> Self {
        self.insert_table(name, columns, rows);
        self
    }

    /// Cursors executed but not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn resolve(&self, query: &str) -> Result<Arc<Table>, OpError> {
        let q = query.trim().trim_end_matches(';').trim();
        let lowered = q.to_ascii_lowercase();
        let name = lowered
            .strip_prefix("select * from ")
            .unwrap_or(lowered.as_str())
            .trim();
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| OpError::Host(format!("no such table: {}", name)))
    }
}

impl DataHandle for MemoryHandle {
    fn execute(&self, query: &str) -> Result<Box<dyn Cursor>, OpError> {
        let table = self.resolve(query)?;
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(query, "memory cursor opened");
        Ok(Box::new(MemoryCursor {
            table,
            pos: 0,
            closed: false,
            open_cursors: Arc::clone(&self.open_cursors),
        }))
    }
}

struct MemoryCursor {
    table: Arc<Table>,
    pos: usize,
    closed: bool,
    open_cursors: Arc<AtomicUsize>,
}

impl Cursor for MemoryCursor {
    fn column_names(&self) -> Vec<String> {
        self.table.columns.clone()
    }

    fn next_row(&mut self) -> Result<Option<Row>, OpError> {
        if self.closed {
            return Err(OpError::Host("cursor is closed".into()));
        }
        let row = self.table.rows.get(self.pos).cloned();
        if row.is_some() {
            self.pos += 1;
        }
        Ok(row)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
