//! Declarative layout rule model
//!
//! This crate provides the data consumed by the layout engine: scalar
//! measurements with units, joiner anchor points, per-level layout rules
//! (with their line-oriented text grammar), and leaf content tokens.
//! All text parsing in this crate is tolerant: malformed input recovers
//! to a defined default instead of failing the caller.

mod joiner;
mod measure;
mod rule;
mod token;

pub use joiner::*;
pub use measure::*;
pub use rule::*;
pub use token::*;
