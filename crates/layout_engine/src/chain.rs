//! Rule normalization against a concrete container size
//!
//! Walks the rule list outermost to innermost once, resolving every
//! relative measurement into absolute pixels. The result is the fixed
//! geometry the placement engine works from.

use crate::{LayoutError, Result};
use rule_model::{Joiner, Rule};
use serde::{Deserialize, Serialize};

/// A joiner with its offsets resolved to absolute pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedJoiner {
    /// Fractional x position of the anchor within the element's box
    pub x_pos: f64,
    /// Fractional y position of the anchor within the element's box
    pub y_pos: f64,
    /// Absolute x offset in pixels
    pub x_offset: f64,
    /// Absolute y offset in pixels
    pub y_offset: f64,
}

impl ResolvedJoiner {
    fn resolve(joiner: &Joiner, base_em: f64, ref_width: f64, ref_height: f64) -> Self {
        Self {
            x_pos: joiner.x_pos,
            y_pos: joiner.y_pos,
            x_offset: joiner.x_offset.resolve(base_em, Some(ref_width)),
            y_offset: joiner.y_offset.resolve(base_em, Some(ref_height)),
        }
    }
}

/// One level of the hierarchy with all measurements resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedNode {
    /// Name carried over from the rule
    pub name: Option<String>,
    /// Fixed width of one instance in pixels; `0.0` means sized by
    /// content
    pub width: f64,
    /// Fixed height of one instance in pixels; `0.0` means sized by
    /// content
    pub height: f64,
    /// Keep-together flag carried over from the rule
    pub glue: bool,
    /// Anchor on an instance where its next sibling attaches
    pub next: ResolvedJoiner,
    /// Anchor on the next sibling
    pub prev: ResolvedJoiner,
}

/// The full rule chain resolved against a container, outermost first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedChain {
    nodes: Vec<ResolvedNode>,
    base_em: f64,
}

impl ResolvedChain {
    /// Resolve a rule set against an absolute container size.
    ///
    /// The outermost level always takes the supplied container size,
    /// whatever its rule declares; every deeper level resolves against
    /// its parent's resolved size. Percent offsets on both of a rule's
    /// joiners resolve against that rule's own resolved size.
    pub fn build(
        rules: &[Rule],
        container_width: f64,
        container_height: f64,
        base_em: f64,
    ) -> Result<Self> {
        if rules.is_empty() {
            return Err(LayoutError::EmptyRuleSet);
        }
        if container_width <= 0.0 || container_height <= 0.0 {
            return Err(LayoutError::InvalidRootSize {
                width: container_width,
                height: container_height,
            });
        }

        let mut nodes = Vec::with_capacity(rules.len());
        let mut parent_width = container_width;
        let mut parent_height = container_height;
        for (index, rule) in rules.iter().enumerate() {
            let (width, height) = if index == 0 {
                (container_width, container_height)
            } else {
                (
                    rule.width.resolve(base_em, Some(parent_width)),
                    rule.height.resolve(base_em, Some(parent_height)),
                )
            };
            let next = ResolvedJoiner::resolve(&rule.next, base_em, width, height);
            let prev = ResolvedJoiner::resolve(&rule.prev, base_em, width, height);
            nodes.push(ResolvedNode {
                name: rule.name.clone(),
                width,
                height,
                glue: rule.glue,
                next,
                prev,
            });
            parent_width = width;
            parent_height = height;
        }

        Ok(Self { nodes, base_em })
    }

    /// Resolve a rule set whose first rule carries the container size
    /// itself.
    ///
    /// The first rule's measurements are resolved with no parent
    /// reference, so a percent-sized outermost level surfaces as
    /// [`LayoutError::InvalidRootSize`].
    pub fn from_rules(rules: &[Rule], base_em: f64) -> Result<Self> {
        let first = rules.first().ok_or(LayoutError::EmptyRuleSet)?;
        let width = first.width.resolve(base_em, None);
        let height = first.height.resolve(base_em, None);
        Self::build(rules, width, height, base_em)
    }

    /// The resolved levels, outermost first
    pub fn nodes(&self) -> &[ResolvedNode] {
        &self.nodes
    }

    /// Number of levels in the chain
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    /// The base font size the chain was resolved with
    pub fn base_em(&self) -> f64 {
        self.base_em
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_model::{Joiner, Measurement};

    fn root_rule() -> Rule {
        Rule::named("root").sized(Measurement::px(600.0), Measurement::px(400.0))
    }

    #[test]
    fn test_empty_rule_set_is_an_error() {
        let result = ResolvedChain::build(&[], 600.0, 400.0, 10.0);
        assert!(matches!(result, Err(LayoutError::EmptyRuleSet)));
    }

    #[test]
    fn test_non_positive_container_is_an_error() {
        let rules = [root_rule()];
        assert!(matches!(
            ResolvedChain::build(&rules, 0.0, 400.0, 10.0),
            Err(LayoutError::InvalidRootSize { .. })
        ));
        assert!(matches!(
            ResolvedChain::build(&rules, 600.0, -1.0, 10.0),
            Err(LayoutError::InvalidRootSize { .. })
        ));
    }

    #[test]
    fn test_outermost_level_takes_container_size_verbatim() {
        // Whatever the first rule declares, including percentages that
        // would have no parent to reference, the outermost node is the
        // supplied container.
        for rule in [
            root_rule(),
            Rule::named("root").sized(Measurement::percent(50.0), Measurement::percent(50.0)),
            Rule::named("root").sized(Measurement::em(3.0), Measurement::ZERO),
        ] {
            let chain = ResolvedChain::build(&[rule], 600.0, 400.0, 10.0).unwrap();
            assert_eq!(chain.nodes()[0].width, 600.0);
            assert_eq!(chain.nodes()[0].height, 400.0);
        }
    }

    #[test]
    fn test_percent_resolves_against_parent() {
        let rules = [
            root_rule(),
            Rule::named("column").sized(Measurement::percent(31.0), Measurement::percent(100.0)),
            Rule::named("cell").sized(Measurement::percent(50.0), Measurement::percent(10.0)),
        ];
        let chain = ResolvedChain::build(&rules, 600.0, 400.0, 10.0).unwrap();
        assert_eq!(chain.nodes()[1].width, 186.0);
        assert_eq!(chain.nodes()[1].height, 400.0);
        assert_eq!(chain.nodes()[2].width, 93.0);
        assert_eq!(chain.nodes()[2].height, 40.0);
    }

    #[test]
    fn test_em_resolves_against_base_font_size() {
        let rules = [
            root_rule(),
            Rule::named("line").sized(Measurement::ZERO, Measurement::em(1.2)),
        ];
        let chain = ResolvedChain::build(&rules, 600.0, 400.0, 10.0).unwrap();
        assert_eq!(chain.nodes()[1].width, 0.0);
        assert!((chain.nodes()[1].height - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_joiner_offsets_resolve_against_own_size() {
        let rules = [
            root_rule(),
            Rule::named("column")
                .sized(Measurement::percent(31.0), Measurement::percent(100.0))
                .with_next(
                    Joiner::TOP_RIGHT.offset(Measurement::percent(3.3), Measurement::ZERO),
                )
                .with_prev(
                    Joiner::TOP_LEFT.offset(Measurement::percent(10.0), Measurement::em(2.0)),
                ),
        ];
        let chain = ResolvedChain::build(&rules, 600.0, 400.0, 10.0).unwrap();
        let column = &chain.nodes()[1];
        // 3.3% of the column's own 186px width
        assert!((column.next.x_offset - 6.138).abs() < 1e-9);
        // prev offsets share the same basis: 10% of 186, then 2em
        assert!((column.prev.x_offset - 18.6).abs() < 1e-9);
        assert!((column.prev.y_offset - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_content_sized_parent_zeroes_percent_children() {
        let rules = [
            root_rule(),
            Rule::named("word"),
            Rule::named("glyph").sized(Measurement::percent(50.0), Measurement::percent(50.0)),
        ];
        let chain = ResolvedChain::build(&rules, 600.0, 400.0, 10.0).unwrap();
        assert_eq!(chain.nodes()[2].width, 0.0);
        assert_eq!(chain.nodes()[2].height, 0.0);
    }

    #[test]
    fn test_from_rules_takes_the_container_from_the_first_rule() {
        let rules = [root_rule(), Rule::named("line")];
        let chain = ResolvedChain::from_rules(&rules, 10.0).unwrap();
        assert_eq!(chain.nodes()[0].width, 600.0);
        assert_eq!(chain.nodes()[0].height, 400.0);
    }

    #[test]
    fn test_from_rules_rejects_relative_roots() {
        let rules =
            [Rule::named("root").sized(Measurement::percent(100.0), Measurement::percent(100.0))];
        assert!(matches!(
            ResolvedChain::from_rules(&rules, 10.0),
            Err(LayoutError::InvalidRootSize { .. })
        ));
    }
}
