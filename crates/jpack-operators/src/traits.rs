//! Operator trait + common interfaces.
//!
//! The host planner calls `plan_access(...)` (any number of times, possibly
//! speculatively), then `open(...)` once per query execution, then pulls
//! frames from the returned `RowStream` until it reports end-of-stream.

use jpack_core::schema::Row;
use thiserror::Error;

use crate::host::{HostContext, OperatorArgs};
use crate::plan::{AccessPlan, Constraint, OrderBy};
use crate::registry::FunctionKind;
use crate::stream::RowStream;

#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Pack(#[from] jpack_core::Error),

    #[error("execution error: {0}")]
    Exec(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("'{name}' is a {actual} function, not a {expected} function")]
    WrongKind {
        name: String,
        expected: FunctionKind,
        actual: FunctionKind,
    },

    #[error("'{name}' expects at least {min} argument(s), got {got}")]
    Arity { name: String, min: usize, got: usize },
}

/// Trait that all streaming operators must implement.
///
/// Invariants:
/// - `plan_access` must be side-effect free.
/// - If `plan_access` claims `pre_sorted`, the rows really must arrive in the
///   requested order. The host trusts the claim and skips its own sort; a
///   false claim silently corrupts downstream GROUP BY / ORDER BY results.
/// - The stream returned by `open` yields the schema before any row.
pub trait StreamingOperator: Send + Sync {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Advisory cost/ordering hints for the host planner.
    fn plan_access(&self, constraints: &[Constraint], order_by: &[OrderBy]) -> AccessPlan;

    /// Validate arguments, open a sub-cursor, and hand back a lazy stream.
    fn open(&self, args: &OperatorArgs, ctx: &HostContext<'_>) -> Result<RowStream, OpError>;
}

/// Producer side of a `RowStream`.
///
/// `RowStream` enforces the framing: it asks for `columns` exactly once, then
/// calls `next_row` until `None`, and calls `close` when done.
pub trait RowSource {
    fn columns(&mut self) -> Result<Vec<String>, OpError>;

    fn next_row(&mut self) -> Result<Option<Row>, OpError>;

    /// Release held resources. Called at most once by `RowStream`.
    fn close(&mut self) {}
}
