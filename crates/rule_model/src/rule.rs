//! Layout rules: one entry per nesting level
//!
//! An ordered list of rules, coarsest level first, describes the whole
//! repeating hierarchy (e.g. page, column, line, word, glyph).

use crate::{Joiner, Measurement};
use serde::{Deserialize, Serialize};

/// A single rule that is part of a set performing a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Optional level name, carried through to the layout output for
    /// diagnostics
    pub name: Option<String>,
    /// Width of elements at this level.
    ///
    /// The first rule in a set must resolve to a strictly positive width
    /// and height; every other level left at [`Measurement::ZERO`] is
    /// sized by its content.
    pub width: Measurement,
    /// Height of elements at this level, same rules as `width`
    pub height: Measurement,
    /// If `true`, all content of one instance of this level is kept in a
    /// single parent container, breaking the parent early if it cannot
    /// fit whole. Ignored when not even a fresh container fits.
    pub glue: bool,
    /// Anchor on this element where the next sibling is added
    pub next: Joiner,
    /// Anchor on the next sibling
    pub prev: Joiner,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            name: None,
            width: Measurement::ZERO,
            height: Measurement::ZERO,
            glue: false,
            next: Joiner::TOP_RIGHT,
            prev: Joiner::TOP_LEFT,
        }
    }
}

impl Rule {
    /// A default rule carrying a level name
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// This rule with an explicit size
    pub fn sized(mut self, width: Measurement, height: Measurement) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// This rule with glue enabled
    pub fn glued(mut self) -> Self {
        self.glue = true;
        self
    }

    /// This rule with a different `next` joiner
    pub fn with_next(mut self, next: Joiner) -> Self {
        self.next = next;
        self
    }

    /// This rule with a different `prev` joiner
    pub fn with_prev(mut self, prev: Joiner) -> Self {
        self.prev = prev;
        self
    }

    /// Parse a single rule line of comma-separated `key=value` fields.
    ///
    /// Recognized keys are `name`, `width`, `height`, `next`, `prev` and
    /// `glue`; unrecognized keys are ignored. Returns `None` for blank
    /// lines.
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }
        let mut rule = Rule::default();
        for field in line.split(',') {
            let Some((key, value)) = field.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "name" => rule.name = Some(value.to_string()),
                "width" => rule.width = Measurement::parse(value),
                "height" => rule.height = Measurement::parse(value),
                "next" => rule.next = Joiner::parse(value),
                "prev" => rule.prev = Joiner::parse(value),
                "glue" => rule.glue = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }
        Some(rule)
    }
}

/// Parse a rule set description, one rule per line, coarsest level
/// first. Blank lines are skipped.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    text.lines().filter_map(Rule::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_joining_contract() {
        let rule = Rule::default();
        assert_eq!(rule.width, Measurement::ZERO);
        assert_eq!(rule.height, Measurement::ZERO);
        assert!(!rule.glue);
        assert_eq!(rule.next, Joiner::TOP_RIGHT);
        assert_eq!(rule.prev, Joiner::TOP_LEFT);
    }

    #[test]
    fn test_parse_full_line() {
        let rule = Rule::parse("name=line, width=100%, height=1.2em, next=BL 0 0.5em, glue=true")
            .unwrap();
        assert_eq!(rule.name.as_deref(), Some("line"));
        assert_eq!(rule.width, Measurement::percent(100.0));
        assert_eq!(rule.height, Measurement::em(1.2));
        assert_eq!(rule.next.y_pos, 1.0);
        assert_eq!(rule.next.y_offset, Measurement::em(0.5));
        assert!(rule.glue);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let rule = Rule::parse("width=5px, color=red, glue=TRUE").unwrap();
        assert_eq!(rule.width, Measurement::px(5.0));
        assert!(rule.glue);
    }

    #[test]
    fn test_parse_non_true_glue_is_false() {
        let rule = Rule::parse("glue=yes").unwrap();
        assert!(!rule.glue);
    }

    #[test]
    fn test_parse_rules_skips_blank_lines() {
        let rules = parse_rules(
            "name=root, width=600px, height=400px\n\
             \n\
             name=column, width=31%, height=100%, next=TR 3.3%\n\
             name=glyph, glue=true\n",
        );
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].name.as_deref(), Some("root"));
        assert_eq!(rules[1].next.x_offset, Measurement::percent(3.3));
        assert!(rules[2].glue);
    }

    #[test]
    fn test_builder_helpers() {
        let rule = Rule::named("word")
            .sized(Measurement::ZERO, Measurement::em(1.0))
            .glued()
            .with_next(Joiner::TOP_RIGHT.offset(Measurement::em(0.5), Measurement::ZERO));
        assert_eq!(rule.name.as_deref(), Some("word"));
        assert_eq!(rule.height, Measurement::em(1.0));
        assert!(rule.glue);
        assert_eq!(rule.next.x_offset, Measurement::em(0.5));
        assert_eq!(rule.prev, Joiner::TOP_LEFT);
    }
}
