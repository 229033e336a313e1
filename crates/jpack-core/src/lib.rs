#![forbid(unsafe_code)]
//! jpack-core: the data model shared by the codec and the streaming operators.
//!
//! - `value`: the `Value` tagged union with an explicit total order.
//! - `pack`: the `Pack` text token newtype.
//! - `schema`: row framing (`Frame`, `Row`) for schema-first streams.
//! - `config`: `PackConfig` knobs, loadable from the environment.
//!
//! No JSON parsing policy lives here; see `jpack-codec`.

pub mod config;
pub mod error;
pub mod pack;
pub mod prelude;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use pack::Pack;
pub use value::Value;
