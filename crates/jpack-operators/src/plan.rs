//! Planning surface handed to the host: constraints and orderings in,
//! `AccessPlan` out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Match,
}

/// A WHERE-clause term the host could push down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub column: usize,
    pub op: ConstraintOp,
    /// The host may offer constraints it cannot actually evaluate yet.
    pub usable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHint {
    pub number: i32,
    pub name: Option<String>,
}

/// Result of `StreamingOperator::plan_access`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPlan {
    /// Indices into the offered constraints that the operator will consume.
    pub usable_constraints: Vec<usize>,

    pub estimated_cost: f64,

    pub index_hint: Option<IndexHint>,

    /// Output already follows the requested ordering; the host may skip its
    /// sort. Only claim what is guaranteed.
    pub pre_sorted: bool,

    pub estimated_rows: u64,
}

impl AccessPlan {
    /// Full scan: no pushed-down constraints, no ordering claim.
    pub fn full_scan(estimated_rows: u64) -> Self {
        Self {
            usable_constraints: vec![],
            estimated_cost: estimated_rows as f64,
            index_hint: None,
            pre_sorted: false,
            estimated_rows,
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = cost;
        self
    }

    pub fn with_pre_sorted(mut self, pre_sorted: bool) -> Self {
        self.pre_sorted = pre_sorted;
        self
    }
}
