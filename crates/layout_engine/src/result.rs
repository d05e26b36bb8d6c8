//! Positioned layout output

use rule_model::Token;
use serde::{Deserialize, Serialize};

/// One placed instance at some level of the hierarchy.
///
/// Leaf instances carry their source token; synthetic seed anchors and
/// intermediate container instances carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedToken {
    /// The source token for leaf content
    pub source: Option<Token>,
    /// Absolute x position in pixels
    pub x: f64,
    /// Absolute y position in pixels
    pub y: f64,
    /// Width of the instance's box
    pub width: f64,
    /// Height of the instance's box
    pub height: f64,
    /// Index of the owning instance in the next-coarser level's list
    pub parent_index: usize,
}

impl PositionedToken {
    /// Right edge of the instance's box
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the instance's box
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether this instance carries real content
    pub fn is_content(&self) -> bool {
        self.source.is_some()
    }
}

/// All instances placed at one level, plus the level's resolved geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Name carried over from the level's rule
    pub name: Option<String>,
    /// Fixed width of one instance, `0.0` when content-sized
    pub width: f64,
    /// Fixed height of one instance, `0.0` when content-sized
    pub height: f64,
    /// Keep-together flag carried over from the level's rule
    pub glue: bool,
    /// Every instance opened at this level, in placement order
    pub instances: Vec<PositionedToken>,
}

impl LevelLayout {
    /// Instances carrying real content, synthetic anchors excluded
    pub fn content_instances(&self) -> impl Iterator<Item = &PositionedToken> {
        self.instances.iter().filter(|t| t.is_content())
    }
}

/// The complete output of one placement run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    /// One entry per rule level, outermost first
    pub levels: Vec<LevelLayout>,
    /// Number of tokens placed past a container edge because no fresh
    /// container could fit them
    pub forced_placements: u32,
}

impl LayoutResult {
    /// The innermost level's layout, where leaf tokens land
    pub fn leaf_level(&self) -> Option<&LevelLayout> {
        self.levels.last()
    }

    /// Placed leaf content in input order
    pub fn placed_tokens(&self) -> impl Iterator<Item = &PositionedToken> {
        self.levels
            .last()
            .into_iter()
            .flat_map(|level| level.content_instances())
    }
}
