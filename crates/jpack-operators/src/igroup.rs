//! `igroup query:<sql>`: pass the rows of a sub-query through unchanged while
//! telling the host planner they already arrive in the order it asked for.
//!
//! This lets a `GROUP BY` over the result run incrementally instead of
//! sorting first. The claim is not checked: rows that are not actually
//! grouped produce split groups, and an `ORDER BY` on an unrelated column
//! is skipped by the host and comes back unsorted.

use crate::host::{CursorSource, HostContext, OperatorArgs};
use crate::plan::{AccessPlan, Constraint, OrderBy};
use crate::stream::RowStream;
use crate::traits::{OpError, StreamingOperator};

#[derive(Debug, Clone)]
pub struct IGroup {
    /// Row-count hint reported to the planner.
    pub estimated_rows: u64,
}

impl Default for IGroup {
    fn default() -> Self {
        Self {
            estimated_rows: 1000,
        }
    }
}

impl StreamingOperator for IGroup {
    fn name(&self) -> &'static str {
        "igroup"
    }

    fn plan_access(&self, _constraints: &[Constraint], _order_by: &[OrderBy]) -> AccessPlan {
        // Free to scan, and always "already sorted".
        AccessPlan::full_scan(self.estimated_rows)
            .with_cost(0.0)
            .with_pre_sorted(true)
    }

    fn open(&self, args: &OperatorArgs, ctx: &HostContext<'_>) -> Result<RowStream, OpError> {
        let query = args.require(self.name(), "query")?;
        let cursor = ctx.db().execute(query)?;
        Ok(RowStream::new(self.name(), Box::new(CursorSource::new(cursor))))
    }
}
