//! `Pack`: the textual token a sequence of values travels as.
//!
//! Construction and parsing rules live in `jpack-codec`; this type only
//! carries the rendered text so APIs can say "a pack" instead of "a string".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pack(String);

impl Pack {
    /// Wrap already-rendered text. Callers are responsible for the rendering
    /// rules; use `jpack_codec::encode` to build a pack from values.
    pub fn from_rendered(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pack {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Pack> for Value {
    fn from(p: Pack) -> Self {
        Value::Text(p.0)
    }
}

impl PartialEq<str> for Pack {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Pack {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
