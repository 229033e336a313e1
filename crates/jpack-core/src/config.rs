//! Codec/operator configuration that downstream crates can serialize/deserialize.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with text that starts like a structured pack (`[` or `{`) but
/// does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the call with `Error::Decode`.
    #[default]
    Error,
    /// Keep the argument as one raw Text value.
    Raw,
}

/// How Sequence values take part in set/sort/dictionary ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedPolicy {
    /// Order and dedup sequences structurally (recursive element-wise order).
    #[default]
    Structural,
    /// Fail with `Error::UnsupportedElement` when a sequence must be ordered.
    Reject,
}

impl FromStr for MalformedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(MalformedPolicy::Error),
            "raw" => Ok(MalformedPolicy::Raw),
            other => Err(Error::Config(format!(
                "unknown malformed policy '{}' (expected 'error' or 'raw')",
                other
            ))),
        }
    }
}

impl FromStr for NestedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structural" => Ok(NestedPolicy::Structural),
            "reject" => Ok(NestedPolicy::Reject),
            other => Err(Error::Config(format!(
                "unknown nested policy '{}' (expected 'structural' or 'reject')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    pub malformed: MalformedPolicy,

    pub nested: NestedPolicy,

    /// Replacement for literal tabs when rendering tab-separated text.
    pub tab_replacement: String,

    /// Row-count hint for operators that cannot estimate their output.
    pub estimated_rows: u64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            malformed: MalformedPolicy::Error,
            nested: NestedPolicy::Structural,
            tab_replacement: "    ".to_string(),
            estimated_rows: 1000,
        }
    }
}

impl PackConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `JPACK_MALFORMED_POLICY`: `error` | `raw`
    /// - `JPACK_NESTED_POLICY`: `structural` | `reject`
    /// - `JPACK_TAB_REPLACEMENT`: replacement text for embedded tabs
    /// - `JPACK_ESTIMATED_ROWS`: default row-count hint
    ///
    /// Unparseable values are ignored, and so is a tab replacement that
    /// itself contains a tab; the result always passes `validate`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("JPACK_MALFORMED_POLICY") {
            if let Ok(v) = s.parse::<MalformedPolicy>() {
                cfg.malformed = v;
            }
        }

        if let Ok(s) = std::env::var("JPACK_NESTED_POLICY") {
            if let Ok(v) = s.parse::<NestedPolicy>() {
                cfg.nested = v;
            }
        }

        if let Ok(s) = std::env::var("JPACK_TAB_REPLACEMENT") {
            if !s.contains('\t') {
                cfg.tab_replacement = s;
            }
        }

        if let Ok(s) = std::env::var("JPACK_ESTIMATED_ROWS") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.estimated_rows = v;
            }
        }

        cfg
    }

    /// Load a JSON config document; missing fields keep their defaults.
    pub fn from_json_str(doc: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(doc).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tab_replacement.contains('\t') {
            return Err(Error::Config(
                "tab_replacement must not contain a tab character".into(),
            ));
        }
        Ok(())
    }
}
