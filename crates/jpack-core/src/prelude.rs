//! Convenient re-exports for downstream crates.

pub use crate::config::{MalformedPolicy, NestedPolicy, PackConfig};
pub use crate::error::{Error, Result};
pub use crate::pack::Pack;
pub use crate::schema::{Frame, Row};
pub use crate::value::Value;
