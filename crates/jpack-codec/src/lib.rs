#![forbid(unsafe_code)]
//! jpack-codec: pack values into one text token and back, plus the derived
//! operations built on top of that (merge, set, sort, flatten, split,
//! dictionary projection) and the lossy tab-separated bridge.
//!
//! Everything here is pure: a `Codec` holds only its `PackConfig`, and every
//! call decodes its arguments, transforms, and re-encodes.

pub mod algebra;
pub mod codec;
pub mod dict;
pub mod tabular;

pub use algebra::{HorizontalSplit, VerticalSplit};
pub use codec::{encode, flatten_recursive, Codec};
