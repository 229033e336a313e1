//! Boundary with the host engine: the data handle an operator may query, and
//! the arguments it was invoked with.

use std::collections::BTreeMap;

use jpack_core::schema::Row;
use jpack_core::{Error, Value};

use crate::traits::{OpError, RowSource};

/// A host sub-cursor: executes one query, yields rows, knows its columns.
pub trait Cursor {
    fn column_names(&self) -> Vec<String>;

    fn next_row(&mut self) -> Result<Option<Row>, OpError>;

    /// Must be idempotent.
    fn close(&mut self);
}

/// The only capability operators need from their environment.
pub trait DataHandle {
    fn execute(&self, query: &str) -> Result<Box<dyn Cursor>, OpError>;
}

/// Per-execution context passed to `StreamingOperator::open`.
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    db: &'a dyn DataHandle,
}

impl<'a> HostContext<'a> {
    pub fn new(db: &'a dyn DataHandle) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &'a dyn DataHandle {
        self.db
    }
}

/// Operator call arguments, already split by the host into positional and
/// named (`key=value`) groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorArgs {
    pub positional: Vec<Value>,
    pub named: BTreeMap<String, String>,
}

impl OperatorArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, v: impl Into<Value>) -> Self {
        self.positional.push(v.into());
        self
    }

    pub fn with_named(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    pub fn named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    /// Named argument `key`, or `MissingArgument` naming `operator`.
    pub fn require(&self, operator: &str, key: &str) -> Result<&str, OpError> {
        self.named(key)
            .ok_or_else(|| Error::missing_argument(operator, key).into())
    }
}

/// Adapts a host `Cursor` to the `RowSource` side of a `RowStream`.
pub struct CursorSource {
    cursor: Box<dyn Cursor>,
}

impl CursorSource {
    pub fn new(cursor: Box<dyn Cursor>) -> Self {
        Self { cursor }
    }
}

impl RowSource for CursorSource {
    fn columns(&mut self) -> Result<Vec<String>, OpError> {
        Ok(self.cursor.column_names())
    }

    fn next_row(&mut self) -> Result<Option<Row>, OpError> {
        self.cursor.next_row()
    }

    fn close(&mut self) {
        self.cursor.close();
    }
}
