//! Row-producing table functions (`jsplitv`, `jsplit`, `jdictsplit`) exposed
//! as `RowSource`s over the codec's frame iterators.

use jpack_core::schema::{Frame, Row};

use crate::traits::{OpError, RowSource};

/// Adapts a schema-first `Frame` iterator to `RowSource`.
pub struct FrameSource<I> {
    name: &'static str,
    frames: I,
}

impl<I: Iterator<Item = Frame>> FrameSource<I> {
    pub fn new(name: &'static str, frames: I) -> Self {
        Self { name, frames }
    }
}

impl<I: Iterator<Item = Frame>> RowSource for FrameSource<I> {
    fn columns(&mut self) -> Result<Vec<String>, OpError> {
        match self.frames.next() {
            Some(Frame::Schema(columns)) => Ok(columns),
            Some(Frame::Row(_)) => Err(OpError::Exec(format!(
                "{}: produced a row before its schema",
                self.name
            ))),
            None => Err(OpError::Exec(format!("{}: produced no schema", self.name))),
        }
    }

    fn next_row(&mut self) -> Result<Option<Row>, OpError> {
        match self.frames.next() {
            Some(Frame::Row(row)) => Ok(Some(row)),
            Some(Frame::Schema(_)) => Err(OpError::Exec(format!(
                "{}: produced a second schema",
                self.name
            ))),
            None => Ok(None),
        }
    }
}
