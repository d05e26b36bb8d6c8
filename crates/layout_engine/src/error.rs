//! Error types for the layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("rule set is empty")]
    EmptyRuleSet,

    #[error("outermost level must resolve to a positive size, got {width}x{height}")]
    InvalidRootSize { width: f64, height: f64 },

    #[error("token {index} carries content but no resolvable size")]
    InvalidToken { index: usize },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
