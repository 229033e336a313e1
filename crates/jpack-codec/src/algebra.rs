//! Pack algebra: operations that decode their arguments, transform the
//! sequence, and re-encode.
//!
//! Unless noted, arguments go through `decode_flat`, so `jmerge('[1,2]', 3)`
//! sees three elements.

use jpack_core::config::NestedPolicy;
use jpack_core::error::{Error, Result};
use jpack_core::schema::{positional_columns, Frame};
use jpack_core::{Pack, Value};

use crate::codec::{encode, flatten_recursive, Codec};

impl Codec {
    /// `jmerge`: concatenate in argument order.
    pub fn merge(&self, args: &[Value]) -> Result<Pack> {
        Ok(encode(&self.decode_flat(args)?))
    }

    /// `jset`: dedup under the canonical order, then sort ascending.
    pub fn setify(&self, args: &[Value]) -> Result<Pack> {
        let mut values = self.decode_flat(args)?;
        self.check_orderable("jset", &values)?;
        values.sort();
        values.dedup();
        Ok(encode(&values))
    }

    /// `jsort`: stable ascending sort, duplicates kept.
    pub fn sortify(&self, args: &[Value]) -> Result<Pack> {
        let mut values = self.decode_flat(args)?;
        self.check_orderable("jsort", &values)?;
        values.sort();
        Ok(encode(&values))
    }

    /// `jfilterempty`: drop `""`, `[]` and null elements.
    pub fn filter_empty(&self, args: &[Value]) -> Result<Pack> {
        let values: Vec<Value> = self
            .decode_flat(args)?
            .into_iter()
            .filter(|v| !v.is_empty_element())
            .collect();
        Ok(encode(&values))
    }

    /// `jflatten`: expand every nested pack down to scalars.
    pub fn flatten(&self, args: &[Value]) -> Result<Pack> {
        Ok(encode(&flatten_recursive(self.decode_elem(args)?)))
    }

    /// `jmergeregexp`: join Text elements as `(?:v1)|(?:v2)|...`.
    ///
    /// Returns plain text, not a pack.
    pub fn merge_regex(&self, args: &[Value]) -> Result<String> {
        let values = self.decode_flat(args)?;
        let mut parts = Vec::with_capacity(values.len());
        for v in &values {
            let text = v.as_text().ok_or_else(|| Error::TypeMismatch {
                function: "jmergeregexp",
                expected: "text",
                found: v.type_name(),
            })?;
            parts.push(format!("(?:{})", text));
        }
        Ok(parts.join("|"))
    }

    /// `jsplitv`: one column `C1`, one row per element.
    pub fn split_vertical(&self, args: &[Value]) -> Result<VerticalSplit> {
        Ok(VerticalSplit {
            schema_sent: false,
            items: self.decode_flat(args)?.into_iter(),
        })
    }

    /// `jsplit`: columns `C1..Cn`, exactly one row.
    ///
    /// An empty pack still yields column `C1` and a single null cell.
    pub fn split_horizontal(&self, args: &[Value]) -> Result<HorizontalSplit> {
        let values = self.decode_flat(args)?;
        let columns = positional_columns(values.len());
        let row = if values.is_empty() {
            vec![Value::Null]
        } else {
            values.iter().map(element_cell).collect()
        };
        Ok(HorizontalSplit::new(columns, row))
    }

    pub(crate) fn check_orderable(&self, function: &'static str, values: &[Value]) -> Result<()> {
        if self.config().nested == NestedPolicy::Structural {
            return Ok(());
        }
        match values.iter().find(|v| !v.is_scalar()) {
            Some(nested) => Err(Error::UnsupportedElement {
                function,
                detail: format!(
                    "nested sequence {} cannot be ordered",
                    encode(std::slice::from_ref(nested))
                ),
            }),
            None => Ok(()),
        }
    }
}

/// One element re-encoded as a single-element pack.
pub(crate) fn element_cell(v: &Value) -> Value {
    encode(std::slice::from_ref(v)).into()
}

/// Lazy frames for `jsplitv`: each row is re-encoded only when pulled.
#[derive(Debug)]
pub struct VerticalSplit {
    schema_sent: bool,
    items: std::vec::IntoIter<Value>,
}

impl Iterator for VerticalSplit {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if !self.schema_sent {
            self.schema_sent = true;
            return Some(Frame::Schema(positional_columns(1)));
        }
        self.items.next().map(|v| Frame::Row(vec![element_cell(&v)]))
    }
}

/// Frames for `jsplit`: the schema, then its single row.
#[derive(Debug)]
pub struct HorizontalSplit {
    frames: std::vec::IntoIter<Frame>,
}

impl HorizontalSplit {
    pub(crate) fn new(columns: Vec<String>, row: Vec<Value>) -> Self {
        Self {
            frames: vec![Frame::Schema(columns), Frame::Row(row)].into_iter(),
        }
    }
}

impl Iterator for HorizontalSplit {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.frames.next()
    }
}
