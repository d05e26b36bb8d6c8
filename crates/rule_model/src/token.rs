//! Leaf content tokens fed to the placement engine

use crate::Measurement;
use serde::{Deserialize, Serialize};

/// One leaf content unit in the input stream.
///
/// Content is opaque to the engine, which only checks for its presence:
/// a token without content is a pure break marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Number of innermost levels to close after placing this token.
    /// Normally `0`.
    pub break_levels: u32,
    /// Thing to render in this token
    pub content: Option<String>,
    /// Explicit width, overriding the innermost level's fixed size
    pub width: Option<Measurement>,
    /// Explicit height, overriding the innermost level's fixed size
    pub height: Option<Measurement>,
}

impl Token {
    /// A content token with an explicit pixel size
    pub fn glyph(content: &str, width: f64, height: f64) -> Self {
        Self {
            break_levels: 0,
            content: Some(content.to_string()),
            width: Some(Measurement::px(width)),
            height: Some(Measurement::px(height)),
        }
    }

    /// A content token sized by the innermost rule
    pub fn content(content: &str) -> Self {
        Self {
            break_levels: 0,
            content: Some(content.to_string()),
            width: None,
            height: None,
        }
    }

    /// A pure break marker closing the given number of innermost levels
    pub fn break_marker(levels: u32) -> Self {
        Self {
            break_levels: levels,
            content: None,
            width: None,
            height: None,
        }
    }

    /// This token, closing `levels` innermost levels after placement
    pub fn with_break(mut self, levels: u32) -> Self {
        self.break_levels = levels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_carries_pixel_size() {
        let token = Token::glyph("H", 6.0, 10.0);
        assert_eq!(token.content.as_deref(), Some("H"));
        assert_eq!(token.width, Some(Measurement::px(6.0)));
        assert_eq!(token.height, Some(Measurement::px(10.0)));
        assert_eq!(token.break_levels, 0);
    }

    #[test]
    fn test_break_marker_has_no_content() {
        let token = Token::break_marker(2);
        assert!(token.content.is_none());
        assert_eq!(token.break_levels, 2);
    }

    #[test]
    fn test_with_break() {
        let token = Token::glyph("i", 6.0, 10.0).with_break(1);
        assert_eq!(token.break_levels, 1);
        assert!(token.content.is_some());
    }
}
