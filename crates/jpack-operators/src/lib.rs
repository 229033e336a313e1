#![forbid(unsafe_code)]
//! jpack-operators: the contract a pluggable row source implements to look
//! like a table to the host engine.
//!
//! Design intent:
//! - Pull-based and single-threaded: the host calls `RowStream::next`, one
//!   frame per call, schema first. Nothing is read ahead.
//! - `plan_access` is pure advice for the host planner (`AccessPlan`).
//! - Every stream owns its sub-cursor and closes it on exhaustion, on error,
//!   on explicit `close()`, and on drop.
//! - Functions and operators are looked up through an explicit `Registry`
//!   built once at startup.

pub mod host;
pub mod igroup;
pub mod memory;
pub mod plan;
pub mod registry;
pub mod stream;
pub mod table;
pub mod traits;

pub use host::{Cursor, DataHandle, HostContext, OperatorArgs};
pub use igroup::IGroup;
pub use memory::MemoryHandle;
pub use plan::{AccessPlan, Constraint, ConstraintOp, IndexHint, OrderBy};
pub use registry::{Capabilities, FunctionKind, Registry};
pub use stream::{RowStream, StreamState};
pub use traits::{OpError, RowSource, StreamingOperator};
