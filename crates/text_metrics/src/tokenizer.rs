//! Convert plain text into a sized token stream

use crate::{measure_char, measure_str};
use rule_model::{Measurement, Token};
use unicode_segmentation::UnicodeSegmentation;

/// Build glyph tokens for a piece of text, one per grapheme cluster.
///
/// Whitespace is consumed as a word boundary, becoming a break of one
/// level on the preceding token; newlines break two levels (a new word
/// and a new line). Widths come from the estimation table, heights are
/// one em.
pub fn tokens_from_text(text: &str, font_size: f64) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for cluster in text.graphemes(true) {
        let Some(first) = cluster.chars().next() else {
            continue;
        };
        if first == '\n' || first == '\r' {
            raise_break(&mut tokens, 2);
            continue;
        }
        if first.is_whitespace() {
            raise_break(&mut tokens, 1);
            continue;
        }
        tokens.push(Token {
            break_levels: 0,
            content: Some(cluster.to_string()),
            width: Some(Measurement::px(measure_str(font_size, cluster))),
            height: Some(Measurement::px(font_size)),
        });
    }
    tokens
}

/// Raise the break level of the last emitted token; leading separators
/// have nothing to break and are dropped.
fn raise_break(tokens: &mut [Token], levels: u32) {
    if let Some(last) = tokens.last_mut() {
        last.break_levels = last.break_levels.max(levels);
    }
}
