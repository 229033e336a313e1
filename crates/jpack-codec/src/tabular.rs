//! Lossy bridge between packs and tab-separated text.
//!
//! `j2t` renders every element as plain text; `t2j` reads every field back as
//! Text. Numeric typing does not survive the trip: `t2j(j2t('[1,2,3]'))` is
//! `["1","2","3"]`.

use jpack_core::error::Result;
use jpack_core::{Pack, Value};

use crate::codec::{encode, Codec};

impl Codec {
    /// `j2t`: elements joined with tabs; embedded tabs become
    /// `tab_replacement` (four spaces by default). No other escaping.
    pub fn to_tabular(&self, args: &[Value]) -> Result<String> {
        let replacement = self.config().tab_replacement.as_str();
        let fields: Vec<String> = self
            .decode_flat(args)?
            .iter()
            .map(|v| v.to_natural_text().replace('\t', replacement))
            .collect();
        Ok(fields.join("\t"))
    }

    /// `t2j`: split every argument's text on tabs; every field is Text.
    pub fn from_tabular(&self, args: &[Value]) -> Pack {
        let fields: Vec<Value> = args
            .iter()
            .flat_map(|arg| {
                arg.to_natural_text()
                    .split('\t')
                    .map(Value::text)
                    .collect::<Vec<_>>()
            })
            .collect();
        encode(&fields)
    }
}
