//! Encode/decode between a `Pack` and a sequence of `Value`s.
//!
//! Rendering rules:
//! - exactly one scalar element renders bare (`a`, `3`, `null`);
//! - anything else renders as a compact JSON array (`[]`, `["a",["b",3]]`).
//!
//! A bare Text is emitted raw only if the raw text decodes back to the same
//! Text; otherwise it is emitted JSON-quoted (`"1"`, `"[x]"`), still without
//! brackets.

use jpack_core::config::{MalformedPolicy, PackConfig};
use jpack_core::error::{Error, Result};
use jpack_core::value::real_to_text;
use jpack_core::{Pack, Value};

/// Holds the decoding policy; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    cfg: PackConfig,
}

/// Result of classifying one textual argument.
enum Classified {
    Array(Vec<Value>),
    Scalar(Value),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Expansion {
    /// Arrays contribute each element (one level).
    Flat,
    /// Arrays contribute one Sequence element.
    Elem,
}

impl Codec {
    /// Codec for a validated `cfg`.
    pub fn new(cfg: PackConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &PackConfig {
        &self.cfg
    }

    /// Decode arguments, flattening array arguments by exactly one level.
    pub fn decode_flat(&self, args: &[Value]) -> Result<Vec<Value>> {
        self.decode(args, Expansion::Flat)
    }

    /// Decode arguments, keeping each array argument as one Sequence.
    pub fn decode_elem(&self, args: &[Value]) -> Result<Vec<Value>> {
        self.decode(args, Expansion::Elem)
    }

    /// `jpack`: pack the arguments, preserving packs passed as arguments as
    /// nested elements.
    pub fn pack(&self, args: &[Value]) -> Result<Pack> {
        Ok(encode(&self.decode_elem(args)?))
    }

    fn decode(&self, args: &[Value], mode: Expansion) -> Result<Vec<Value>> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Value::Text(text) => match self.classify(text)? {
                    Classified::Array(items) if mode == Expansion::Flat => out.extend(items),
                    Classified::Array(items) => out.push(Value::Sequence(items)),
                    Classified::Scalar(v) => out.push(v),
                },
                Value::Sequence(items) if mode == Expansion::Flat => {
                    out.extend(items.iter().cloned())
                }
                other => out.push(other.clone()),
            }
        }
        Ok(out)
    }

    fn classify(&self, text: &str) -> Result<Classified> {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Array(items)) => Ok(Classified::Array(
                items.into_iter().map(Value::from_json).collect(),
            )),
            // Objects are dictionary packs; keep their exact text.
            Ok(serde_json::Value::Object(_)) => Ok(Classified::Scalar(Value::text(text))),
            Ok(scalar) => Ok(Classified::Scalar(Value::from_json(scalar))),
            Err(e) if looks_structured(text) => match self.cfg.malformed {
                MalformedPolicy::Error => Err(Error::decode(text, e)),
                MalformedPolicy::Raw => {
                    tracing::warn!(input = %text, error = %e, "malformed pack kept as raw text");
                    Ok(Classified::Scalar(Value::text(text)))
                }
            },
            Err(_) => Ok(Classified::Scalar(Value::text(text))),
        }
    }
}

/// Text that claims to be an array or object pack.
pub(crate) fn looks_structured(text: &str) -> bool {
    let t = text.trim_start();
    t.starts_with('[') || t.starts_with('{')
}

/// Render a sequence of values as a pack.
pub fn encode(values: &[Value]) -> Pack {
    match values {
        [single] if single.is_scalar() => Pack::from_rendered(render_bare(single)),
        _ => Pack::from_rendered(
            serde_json::Value::Array(values.iter().map(Value::to_json).collect()).to_string(),
        ),
    }
}

fn render_bare(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => real_to_text(*f),
        Value::Text(s) if text_renders_raw(s) => s.clone(),
        Value::Text(s) => serde_json::Value::String(s.clone()).to_string(),
        Value::Sequence(_) => v.to_json().to_string(),
    }
}

/// Whether decoding `s` yields exactly `Text(s)` under every policy.
fn text_renders_raw(s: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(s) {
        Ok(serde_json::Value::Object(_)) => true,
        Ok(_) => false,
        Err(_) => !looks_structured(s),
    }
}

/// Expand every Sequence into its scalar descendants, depth-unbounded,
/// preserving order.
pub fn flatten_recursive(values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    fn walk(v: Value, out: &mut Vec<Value>) {
        match v {
            Value::Sequence(items) => {
                for item in items {
                    walk(item, out);
                }
            }
            scalar => out.push(scalar),
        }
    }

    let mut out = Vec::new();
    for v in values {
        walk(v, &mut out);
    }
    out
}
