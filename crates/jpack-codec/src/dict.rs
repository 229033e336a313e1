//! Dictionary-shaped packs: JSON objects passed as a single argument.
//!
//! Without selected keys, entries come out ordered by `(value, key)`: the
//! value is the primary sort key and the key name only breaks ties. This is
//! the observed behaviour of the `jdictvals`/`jdictsplit` functions even
//! though their documentation says "sorted by keys"; it is kept on purpose.

use std::collections::BTreeSet;

use jpack_core::config::MalformedPolicy;
use jpack_core::error::{Error, Result};
use jpack_core::{Pack, Value};
use serde_json::{Map, Value as Json};

use crate::algebra::{element_cell, HorizontalSplit};
use crate::codec::{encode, Codec};

type Object = Map<String, Json>;

impl Codec {
    /// `jdictkeys`: union of the keys of every object argument, ascending.
    ///
    /// Non-object arguments (including numbers) contribute nothing.
    pub fn dict_keys(&self, args: &[Value]) -> Result<Pack> {
        let mut keys = BTreeSet::new();
        for arg in args {
            if let Some(obj) = self.parse_object(arg)? {
                keys.extend(obj.into_iter().map(|(k, _)| k));
            }
        }
        let keys: Vec<Value> = keys.into_iter().map(Value::Text).collect();
        Ok(encode(&keys))
    }

    /// `jdictvals(dict, [key...])`.
    ///
    /// A first argument that is not an object is returned unchanged. Missing
    /// selected keys yield null.
    pub fn dict_values(&self, args: &[Value]) -> Result<Value> {
        let (first, selected) = split_dict_args("jdictvals", args)?;
        let Some(obj) = self.parse_object(first)? else {
            return Ok(first.clone());
        };
        let (_, values) = self.resolve_entries("jdictvals", obj, selected)?;
        Ok(encode(&values).into())
    }

    /// `jdictsplit(dict, [key...])`: the resolved key names as the schema,
    /// then one row with the corresponding values.
    pub fn dict_split(&self, args: &[Value]) -> Result<HorizontalSplit> {
        let (first, selected) = split_dict_args("jdictsplit", args)?;
        let obj = self.parse_object(first)?.ok_or_else(|| Error::TypeMismatch {
            function: "jdictsplit",
            expected: "object",
            found: first.type_name(),
        })?;
        let (keys, values) = self.resolve_entries("jdictsplit", obj, selected)?;
        let row = values.into_iter().map(dict_cell).collect();
        Ok(HorizontalSplit::new(keys, row))
    }

    fn resolve_entries(
        &self,
        function: &'static str,
        obj: Object,
        selected: &[Value],
    ) -> Result<(Vec<String>, Vec<Value>)> {
        if selected.is_empty() {
            let mut entries: Vec<(String, Value)> = obj
                .into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect();
            let values: Vec<Value> = entries.iter().map(|(_, v)| v.clone()).collect();
            self.check_orderable(function, &values)?;
            entries.sort_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| ka.cmp(kb)));
            return Ok(entries.into_iter().unzip());
        }

        let keys: Vec<String> = selected.iter().map(Value::to_natural_text).collect();
        let values = keys
            .iter()
            .map(|k| obj.get(k).cloned().map(Value::from_json).unwrap_or(Value::Null))
            .collect();
        Ok((keys, values))
    }

    /// `Some(map)` when the argument's trimmed text is `{...}`.
    fn parse_object(&self, arg: &Value) -> Result<Option<Object>> {
        let Some(text) = arg.as_text() else {
            return Ok(None);
        };
        let trimmed = text.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return Ok(None);
        }
        match serde_json::from_str::<Json>(trimmed) {
            Ok(Json::Object(obj)) => Ok(Some(obj)),
            Ok(_) => Ok(None),
            Err(e) => match self.config().malformed {
                MalformedPolicy::Error => Err(Error::decode(text, e)),
                MalformedPolicy::Raw => {
                    tracing::warn!(input = %text, error = %e, "malformed dictionary treated as plain text");
                    Ok(None)
                }
            },
        }
    }
}

fn split_dict_args<'a>(
    function: &'static str,
    args: &'a [Value],
) -> Result<(&'a Value, &'a [Value])> {
    args.split_first()
        .ok_or_else(|| Error::missing_argument(function, "jdict"))
}

/// Scalars pass through as cells; nested sequences travel as packs.
fn dict_cell(v: Value) -> Value {
    if v.is_scalar() {
        v
    } else {
        element_cell(&v)
    }
}
