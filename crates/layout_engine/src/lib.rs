//! Layout engine - rule normalization and token placement
//!
//! This crate converts a declarative chain of nesting rules plus a
//! stream of sized leaf tokens into absolute pixel positions at every
//! level of the hierarchy. Normalization resolves all relative
//! measurements against a concrete container size once; placement then
//! walks the token stream, applying joiner geometry, explicit breaks,
//! glue grouping and overflow-triggered container creation.

mod chain;
mod error;
mod placer;
mod result;

pub use chain::*;
pub use error::*;
pub use placer::*;
pub use result::*;
