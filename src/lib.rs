#![forbid(unsafe_code)]
//! jpack: exchange ordered sequences of typed values with a relational engine
//! as single text tokens ("packs"), and stream rows into it lazily.
//!
//! This facade re-exports the member crates:
//! - `jpack_core`: `Value`, `Pack`, row framing, errors, configuration.
//! - `jpack_codec`: encode/decode, pack algebra, dictionaries, tabular adapter.
//! - `jpack_operators`: the streaming operator contract and the function registry.

pub use jpack_codec;
pub use jpack_core;
pub use jpack_operators;

pub use jpack_codec::{encode, flatten_recursive, Codec};
pub use jpack_core::prelude::*;
pub use jpack_operators::{Registry, RowStream, StreamingOperator};
