//! Row framing for schema-first streams.
//!
//! Every stream a table function or streaming operator produces starts with
//! exactly one `Frame::Schema` (the column names), followed by zero or more
//! `Frame::Row`s. Frames are never rewound.

use serde::{Deserialize, Serialize};

use crate::value::Value;

pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Frame {
    Schema(Vec<String>),
    Row(Row),
}

impl Frame {
    pub fn is_schema(&self) -> bool {
        matches!(self, Frame::Schema(_))
    }

    pub fn into_row(self) -> Option<Row> {
        match self {
            Frame::Row(r) => Some(r),
            Frame::Schema(_) => None,
        }
    }

    pub fn into_schema(self) -> Option<Vec<String>> {
        match self {
            Frame::Schema(cols) => Some(cols),
            Frame::Row(_) => None,
        }
    }
}

/// Column names `C1..Cn`; at least `C1`.
pub fn positional_columns(n: usize) -> Vec<String> {
    (1..=n.max(1)).map(|i| format!("C{}", i)).collect()
}
