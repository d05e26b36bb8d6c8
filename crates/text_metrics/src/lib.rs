//! Font-metrics estimation and token stream preparation
//!
//! The layout core consumes already-sized tokens; this crate supplies a
//! rough width-estimation oracle for when reading a real font is not
//! practical, and a tokenizer turning plain text into a sized token
//! stream.

mod font_guess;
mod tokenizer;

pub use font_guess::*;
pub use tokenizer::*;
