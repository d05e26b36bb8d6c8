//! Placement engine
//!
//! Walks the token stream once against a resolved chain and emits
//! absolute positions. Every level's instance list starts with a
//! synthetic anchor seeded into its parent; leaf tokens then join the
//! innermost chain sibling by sibling. Overflow closes containers and
//! opens fresh ones, glue relocates kept-together content wholesale,
//! and explicit breaks close innermost levels unconditionally.

use crate::{LayoutError, LayoutResult, LevelLayout, PositionedToken, ResolvedChain,
            ResolvedJoiner, Result};
use rule_model::Token;

const EPS: f64 = 1e-6;

/// An axis-aligned box in absolute pixels
#[derive(Debug, Clone, Copy)]
struct Box2 {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Per-level geometry copied out of the chain for cheap access
#[derive(Debug, Clone, Copy)]
struct LevelGeom {
    width: f64,
    height: f64,
    glue: bool,
    next: ResolvedJoiner,
    prev: ResolvedJoiner,
}

/// Anchor math: position the later box so that its incoming anchor
/// lands on the earlier box's outgoing anchor, displaced by both
/// declared offsets.
fn relative_position(
    earlier: Box2,
    outgoing: ResolvedJoiner,
    later_width: f64,
    later_height: f64,
    incoming: ResolvedJoiner,
) -> (f64, f64) {
    let x = earlier.x + outgoing.x_pos * earlier.width + outgoing.x_offset + incoming.x_offset
        - incoming.x_pos * later_width;
    let y = earlier.y + outgoing.y_pos * earlier.height + outgoing.y_offset + incoming.y_offset
        - incoming.y_pos * later_height;
    (x, y)
}

/// Placement engine for one layout run.
///
/// Owns all per-run state; build a new placer (cloning the chain if
/// need be) for every invocation. With a single-level chain the
/// container seed is the first sibling and no overflow is ever
/// triggered, since no level exists above the leaves.
pub struct Placer {
    chain: ResolvedChain,
    geoms: Vec<LevelGeom>,
    levels: Vec<Vec<PositionedToken>>,
    forced_placements: u32,
}

impl Placer {
    /// Create a placer and seed every level's anchor chain
    pub fn new(chain: ResolvedChain) -> Self {
        let geoms = chain
            .nodes()
            .iter()
            .map(|node| LevelGeom {
                width: node.width,
                height: node.height,
                glue: node.glue,
                next: node.next,
                prev: node.prev,
            })
            .collect::<Vec<_>>();
        let mut placer = Self {
            chain,
            geoms,
            levels: Vec::new(),
            forced_placements: 0,
        };
        placer.seed_all();
        placer
    }

    /// Consume the token stream and produce the layout result
    pub fn place<I>(mut self, tokens: I) -> Result<LayoutResult>
    where
        I: IntoIterator<Item = Token>,
    {
        for (index, token) in tokens.into_iter().enumerate() {
            self.place_token(index, token)?;
        }
        Ok(self.finish())
    }

    fn place_token(&mut self, index: usize, token: Token) -> Result<()> {
        let break_levels = token.break_levels;
        if token.content.is_some() {
            let (width, height) = self.token_size(index, &token)?;
            self.place_leaf(token, width, height, false);
        }
        if break_levels > 0 {
            self.apply_break(break_levels);
        }
        Ok(())
    }

    /// Effective box size for a content-bearing token, per axis:
    /// explicit measurement, else the leaf level's fixed size.
    fn token_size(&self, index: usize, token: &Token) -> Result<(f64, f64)> {
        let leaf = self.levels.len() - 1;
        let geom = self.geoms[leaf];
        let base_em = self.chain.base_em();
        // percent sizes are relative to the box the leaf lives in
        let basis = if leaf == 0 {
            self.geoms[0]
        } else {
            self.geoms[leaf - 1]
        };
        let width = match token.width {
            Some(m) if m.is_set() => m.resolve(base_em, Some(basis.width)),
            _ if geom.width > 0.0 => geom.width,
            _ => return Err(LayoutError::InvalidToken { index }),
        };
        let height = match token.height {
            Some(m) if m.is_set() => m.resolve(base_em, Some(basis.height)),
            _ if geom.height > 0.0 => geom.height,
            _ => return Err(LayoutError::InvalidToken { index }),
        };
        Ok((width, height))
    }

    /// Place one leaf, closing and reopening containers until it fits.
    ///
    /// `relocating` is set while re-placing a glued unit that has just
    /// been moved; glue is not honored again in that state.
    fn place_leaf(&mut self, token: Token, width: f64, height: f64, relocating: bool) {
        let leaf = self.levels.len() - 1;
        let geom = self.geoms[leaf];
        let mut allow_relocate = !relocating;
        let mut attempts = 0;
        loop {
            let previous = self.current_leaf_box();
            let (x, y) = relative_position(previous, geom.next, width, height, geom.prev);
            let candidate = Box2 {
                x,
                y,
                width,
                height,
            };
            let Some(violated) = self.innermost_violation(&candidate) else {
                self.commit_leaf(token, candidate);
                return;
            };
            attempts += 1;
            if attempts > self.levels.len() + 2 {
                // the freshness rule below should make this unreachable
                self.force_place(token, candidate);
                return;
            }
            // Break at the violated container's child, escalating outward
            // past levels whose current instance holds no content yet: a
            // sibling of a still-empty container can never fit better.
            let mut close_at = (violated + 1).min(self.levels.len() - 2);
            while close_at > 0 && self.subtree_is_fresh(close_at) {
                close_at -= 1;
            }
            if close_at == 0 {
                self.force_place(token, candidate);
                return;
            }
            let relocated = if allow_relocate {
                self.take_glued_leaves(close_at)
            } else {
                Vec::new()
            };
            allow_relocate = false;
            self.open_sibling(close_at);
            for (source, w, h) in relocated {
                self.place_leaf(source, w, h, true);
            }
        }
    }

    /// Unconditionally close the `count` innermost non-leaf levels and
    /// open fresh siblings, regardless of remaining space
    fn apply_break(&mut self, count: u32) {
        let n = self.levels.len();
        if n < 3 {
            return;
        }
        let target = n.saturating_sub(1 + count as usize).max(1);
        self.open_sibling(target);
    }

    /// Seed the instance list of every level in order
    fn seed_all(&mut self) {
        let n = self.geoms.len();
        self.levels = vec![Vec::new(); n];
        let root = self.geoms[0];
        self.levels[0].push(PositionedToken {
            source: None,
            x: 0.0,
            y: 0.0,
            width: root.width,
            height: root.height,
            parent_index: 0,
        });
        for level in 1..n {
            self.seed_level(level);
        }
    }

    /// Open the synthetic anchor instance that starts a level, aligned
    /// into the current parent instance via both levels' `prev` joiners
    fn seed_level(&mut self, level: usize) {
        let parent_geom = self.geoms[level - 1];
        let geom = self.geoms[level];
        let parent_index = self.levels[level - 1].len() - 1;
        let parent = &self.levels[level - 1][parent_index];
        let parent_box = Box2 {
            x: parent.x,
            y: parent.y,
            width: parent.width,
            height: parent.height,
        };
        let (x, y) =
            relative_position(parent_box, parent_geom.prev, geom.width, geom.height, geom.prev);
        self.levels[level].push(PositionedToken {
            source: None,
            x,
            y,
            width: geom.width,
            height: geom.height,
            parent_index,
        });
    }

    /// Close the current instance at `level`, open a sibling attached
    /// via the level's joiners, and re-seed every deeper level into it
    fn open_sibling(&mut self, level: usize) {
        let geom = self.geoms[level];
        let closing = self.levels[level].len() - 1;
        let closing_box = self.extent(level, closing);
        let (x, y) =
            relative_position(closing_box, geom.next, geom.width, geom.height, geom.prev);
        let parent_index = self.levels[level - 1].len() - 1;
        tracing::trace!(level, x, y, "opening sibling container");
        self.levels[level].push(PositionedToken {
            source: None,
            x,
            y,
            width: geom.width,
            height: geom.height,
            parent_index,
        });
        for deeper in (level + 1)..self.levels.len() {
            self.seed_level(deeper);
        }
    }

    /// Innermost ancestor level whose fixed box the candidate exceeds
    fn innermost_violation(&self, candidate: &Box2) -> Option<usize> {
        let leaf = self.levels.len() - 1;
        for level in (0..leaf).rev() {
            let geom = self.geoms[level];
            let inst = &self.levels[level][self.levels[level].len() - 1];
            if geom.width > 0.0 && candidate.x + candidate.width > inst.x + geom.width + EPS {
                return Some(level);
            }
            if geom.height > 0.0 && candidate.y + candidate.height > inst.y + geom.height + EPS {
                return Some(level);
            }
        }
        None
    }

    /// Whether the current instance at `level` holds no content leaves
    fn subtree_is_fresh(&self, level: usize) -> bool {
        let leaf = self.levels.len() - 1;
        match self.levels[leaf].iter().rposition(|t| t.is_content()) {
            None => true,
            Some(i) => self.ancestor_index(leaf, i, level) != self.levels[level].len() - 1,
        }
    }

    /// Index of the instance's ancestor at `target` level
    fn ancestor_index(&self, level: usize, index: usize, target: usize) -> usize {
        let mut lvl = level;
        let mut idx = index;
        while lvl > target {
            idx = self.levels[lvl][idx].parent_index;
            lvl -= 1;
        }
        idx
    }

    /// Remove the leaf content of the outermost glued instance that a
    /// break at `close_at` would split, returning the source tokens with
    /// their placed sizes, in placement order
    fn take_glued_leaves(&mut self, close_at: usize) -> Vec<(Token, f64, f64)> {
        let leaf = self.levels.len() - 1;
        for level in (close_at + 1)..leaf {
            if !self.geoms[level].glue {
                continue;
            }
            let current = self.levels[level].len() - 1;
            // the current instance's leaves form a suffix of the leaf list
            let mut start = self.levels[leaf].len();
            while start > 0 && self.ancestor_index(leaf, start - 1, level) == current {
                start -= 1;
            }
            let moved = self.levels[leaf].split_off(start);
            let relocated: Vec<(Token, f64, f64)> = moved
                .into_iter()
                .filter_map(|t| {
                    let PositionedToken {
                        source,
                        width,
                        height,
                        ..
                    } = t;
                    source.map(|s| (s, width, height))
                })
                .collect();
            if relocated.is_empty() {
                continue;
            }
            tracing::trace!(level, count = relocated.len(), "relocating glued content");
            return relocated;
        }
        Vec::new()
    }

    /// Current box of an instance: fixed axes from the level's geometry,
    /// content axes grown to the union of descendant boxes.
    // TODO: cache subtree extents per open instance instead of rescanning
    fn extent(&self, level: usize, index: usize) -> Box2 {
        let inst = &self.levels[level][index];
        let mut result = Box2 {
            x: inst.x,
            y: inst.y,
            width: inst.width,
            height: inst.height,
        };
        let leaf = self.levels.len() - 1;
        if level == leaf {
            return result;
        }
        let grow_width = self.geoms[level].width <= 0.0;
        let grow_height = self.geoms[level].height <= 0.0;
        if !grow_width && !grow_height {
            return result;
        }
        let mut right = result.x + result.width;
        let mut bottom = result.y + result.height;
        for (child_index, child) in self.levels[level + 1].iter().enumerate() {
            if child.parent_index != index {
                continue;
            }
            let child_box = self.extent(level + 1, child_index);
            right = right.max(child_box.x + child_box.width);
            bottom = bottom.max(child_box.y + child_box.height);
        }
        if grow_width {
            result.width = right - result.x;
        }
        if grow_height {
            result.height = bottom - result.y;
        }
        result
    }

    fn current_leaf_box(&self) -> Box2 {
        let leaf = self.levels.len() - 1;
        let inst = &self.levels[leaf][self.levels[leaf].len() - 1];
        Box2 {
            x: inst.x,
            y: inst.y,
            width: inst.width,
            height: inst.height,
        }
    }

    fn commit_leaf(&mut self, token: Token, b: Box2) {
        let leaf = self.levels.len() - 1;
        let parent_index = if leaf == 0 {
            0
        } else {
            self.levels[leaf - 1].len() - 1
        };
        self.levels[leaf].push(PositionedToken {
            source: Some(token),
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            parent_index,
        });
    }

    fn force_place(&mut self, token: Token, b: Box2) {
        self.forced_placements += 1;
        tracing::warn!(x = b.x, y = b.y, "no fresh container fits; placing past the edge");
        self.commit_leaf(token, b);
    }

    /// Write content-axis extents back into intermediate instances so
    /// the emitted boxes cover their content
    fn finalize_extents(&mut self) {
        if self.levels.len() < 2 {
            return;
        }
        let leaf = self.levels.len() - 1;
        for level in (0..leaf).rev() {
            let grow_width = self.geoms[level].width <= 0.0;
            let grow_height = self.geoms[level].height <= 0.0;
            if !grow_width && !grow_height {
                continue;
            }
            let (head, tail) = self.levels.split_at_mut(level + 1);
            let parents = &mut head[level];
            let children = &tail[0];
            for (index, parent) in parents.iter_mut().enumerate() {
                let mut right = parent.x + parent.width;
                let mut bottom = parent.y + parent.height;
                for child in children.iter().filter(|c| c.parent_index == index) {
                    right = right.max(child.x + child.width);
                    bottom = bottom.max(child.y + child.height);
                }
                if grow_width {
                    parent.width = right - parent.x;
                }
                if grow_height {
                    parent.height = bottom - parent.y;
                }
            }
        }
    }

    fn finish(mut self) -> LayoutResult {
        self.finalize_extents();
        let instance_lists = std::mem::take(&mut self.levels);
        let levels = self
            .chain
            .nodes()
            .iter()
            .zip(instance_lists)
            .map(|(node, instances)| LevelLayout {
                name: node.name.clone(),
                width: node.width,
                height: node.height,
                glue: node.glue,
                instances,
            })
            .collect();
        LayoutResult {
            levels,
            forced_placements: self.forced_placements,
        }
    }
}
