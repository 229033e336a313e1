//! `RowStream`: the pull-based, schema-first iterator handed to the host.
//!
//! State machine:
//!
//! ```text
//! Unopened --next--> Streaming --next (rows)--> Streaming
//!    |                   |--next (end)--> Exhausted
//!    |                   |--error-------> Failed
//!    |--error--> Failed
//! ```
//!
//! The source is closed on the transition into `Exhausted` or `Failed`, on an
//! explicit `close()`, and on drop; closing is idempotent. Once exhausted or
//! failed, `next` keeps returning `None`.

use std::iter::FusedIterator;

use jpack_core::schema::Frame;

use crate::traits::{OpError, RowSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Nothing pulled yet; the schema is next.
    Unopened,
    /// Schema delivered; rows follow.
    Streaming,
    Exhausted,
    Failed,
}

pub struct RowStream {
    operator: String,
    source: Box<dyn RowSource>,
    state: StreamState,
    closed: bool,
    rows: u64,
}

impl RowStream {
    pub fn new(operator: impl Into<String>, source: Box<dyn RowSource>) -> Self {
        let operator = operator.into();
        tracing::debug!(operator = %operator, "row stream opened");
        Self {
            operator,
            source,
            state: StreamState::Unopened,
            closed: false,
            rows: 0,
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Data rows produced so far (the schema is not counted).
    pub fn rows_produced(&self) -> u64 {
        self.rows
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pull one frame: the schema on the first call, then one row per call,
    /// then `None` forever.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, OpError> {
        match self.state {
            StreamState::Exhausted | StreamState::Failed => Ok(None),
            StreamState::Unopened => match self.source.columns() {
                Ok(columns) => {
                    self.state = StreamState::Streaming;
                    tracing::trace!(operator = %self.operator, ?columns, "schema");
                    Ok(Some(Frame::Schema(columns)))
                }
                Err(e) => self.fail(e),
            },
            StreamState::Streaming => match self.source.next_row() {
                Ok(Some(row)) => {
                    self.rows += 1;
                    tracing::trace!(operator = %self.operator, row = self.rows, "row");
                    Ok(Some(Frame::Row(row)))
                }
                Ok(None) => {
                    self.state = StreamState::Exhausted;
                    self.close();
                    Ok(None)
                }
                Err(e) => self.fail(e),
            },
        }
    }

    /// Release the source. Safe to call repeatedly; a stream closed early by
    /// the host reports `Exhausted` and yields nothing further.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if matches!(self.state, StreamState::Unopened | StreamState::Streaming) {
            self.state = StreamState::Exhausted;
        }
        self.source.close();
        tracing::debug!(
            operator = %self.operator,
            rows = self.rows,
            state = ?self.state,
            "row stream closed"
        );
    }

    /// Drain the remaining frames into memory. Meant for tests and small
    /// results; defeats the streaming bound for large ones.
    pub fn collect_frames(mut self) -> Result<Vec<Frame>, OpError> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    fn fail(&mut self, e: OpError) -> Result<Option<Frame>, OpError> {
        tracing::debug!(operator = %self.operator, error = %e, "row stream failed");
        self.state = StreamState::Failed;
        self.close();
        Err(e)
    }
}

impl Iterator for RowStream {
    type Item = Result<Frame, OpError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

impl FusedIterator for RowStream {}

impl Drop for RowStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RowStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStream")
            .field("operator", &self.operator)
            .field("state", &self.state)
            .field("rows", &self.rows)
            .field("closed", &self.closed)
            .finish()
    }
}
